//! Tessellation of primitives into [`DrawList`](crate::DrawList) commands.
//!
//! Based on `ImDrawList` from Dear ImGui by Omar Cornut
//! (<https://github.com/ocornut/imgui/>, MIT license).
mod fill;
mod shapes;
mod stroke;
