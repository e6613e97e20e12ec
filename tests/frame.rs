mod common;

use common::draw_scene;
use immediate_drawing::{vec2, Context, DrawConfig, DrawFlags, HeadlessBackend, Rect, Rgba, Vec2};

fn context() -> Context<HeadlessBackend> {
    Context::new(HeadlessBackend::new(800.0, 600.0), DrawConfig::default()).unwrap()
}

#[test]
fn full_window_rect() {
    let mut ctx = context();
    assert!(!ctx.start_frame());
    ctx.draw_list_mut()
        .add_rect_filled(Vec2::ZERO, vec2(800.0, 600.0), Rgba(0xFFFF_FFFF), 0.0, DrawFlags::empty());
    ctx.render_frame();

    let list = ctx.draw_list();
    assert_eq!(list.commands().len(), 1);
    assert_eq!(list.indices(), &[0, 1, 2, 2, 3, 0]);
    assert_eq!(list.vertices().len(), 4);
    assert!(list.vertices().iter().all(|v| v.col == Rgba(0xFFFF_FFFF)));
    assert_eq!(list.commands()[0].clip_rect, Rect::new(Vec2::ZERO, vec2(800.0, 600.0)));

    let stats = ctx.backend().last_frame();
    assert_eq!((stats.commands, stats.vertices, stats.indices), (1, 4, 6));
}

#[test]
fn every_index_is_in_range() {
    let mut ctx = context();
    ctx.start_frame();
    draw_scene(ctx.draw_list_mut());
    let list = ctx.draw_list();

    let mut expected_offset = 0;
    for cmd in list.commands() {
        assert_eq!(cmd.idx_offset, expected_offset);
        assert_eq!(cmd.elem_count % 3, 0);
        expected_offset += cmd.elem_count;
        for &i in &list.indices()[cmd.idx_offset..cmd.idx_offset + cmd.elem_count] {
            assert!((i as usize) >= cmd.vtx_offset, "index {i} before command vertices");
            assert!((i as usize) < list.vertices().len());
        }
    }
    assert_eq!(expected_offset, list.indices().len());
}

#[test]
fn buffers_are_reused_between_frames() {
    let mut ctx = context();
    ctx.start_frame();
    draw_scene(ctx.draw_list_mut());
    ctx.render_frame();
    let first = (
        ctx.draw_list().vertices().as_ptr(),
        ctx.draw_list().indices().as_ptr(),
        ctx.draw_list().commands().as_ptr(),
        ctx.draw_list().vertices().len(),
    );

    for _ in 0..3 {
        ctx.start_frame();
        draw_scene(ctx.draw_list_mut());
        ctx.render_frame();
        let list = ctx.draw_list();
        assert_eq!(
            (list.vertices().as_ptr(), list.indices().as_ptr(), list.commands().as_ptr(), list.vertices().len()),
            first
        );
    }
    assert_eq!(ctx.backend().frames_rendered(), 4);
}

#[test]
fn frame_loop_until_close() {
    let mut ctx = Context::new(HeadlessBackend::new(320.0, 240.0).close_after(5), DrawConfig::default()).unwrap();
    let mut frames = 0;
    while !ctx.start_frame() {
        draw_scene(ctx.draw_list_mut());
        ctx.render_frame();
        frames += 1;
    }
    assert_eq!(frames, 4);
    let backend = ctx.destroy();
    assert_eq!(backend.texture_count(), 0);
}

#[test]
fn merged_side_list_keeps_order() {
    let mut ctx = context();
    ctx.start_frame();
    let mut icon = ctx.new_draw_list();
    icon.add_circle_filled(Vec2::ZERO, 8.0, Rgba::WHITE, 12);

    ctx.draw_list_mut().add_rect_filled(Vec2::ZERO, vec2(10.0, 10.0), Rgba::BLACK, 0.0, DrawFlags::empty());
    for i in 0..3 {
        let t = immediate_drawing::Affine2::from_translation(vec2(20.0 * i as f32, 0.0));
        ctx.add_list(&icon, Some(&t));
    }
    let list = ctx.draw_list();
    assert_eq!(list.commands().len(), 1 + 3 * icon.commands().len());
    assert_eq!(list.vertices().len(), 4 + 3 * icon.vertices().len());
    let last = list.commands().last().unwrap();
    assert_eq!(last.vtx_offset, 4 + 2 * icon.vertices().len());
}
