use super::atlas::FontAtlas;
use super::face::FontFace;
use super::fontdue_face::{FaceOptions, FontdueFace};
use crate::backend::GraphicsBackend;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Most sizes below the normal one a manager builds.
pub const MAX_SMALLER: usize = 4;
/// Most sizes above the normal one a manager builds.
pub const MAX_LARGER: usize = 8;

/// Role of a font in a user interface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontFamily {
    Regular,
    Bold,
    Italic,
    Medium,
    MediumItalic,
    BoldItalic,
    Mono,
    MonoBold,
    MonoItalic,
    MonoBoldItalic,
    Custom(u16),
}

#[derive(Debug)]
struct Family {
    data: Vec<u8>,
    /// One atlas per relative size, smallest first. Empty until built.
    atlases: Vec<FontAtlas>,
}

/// Atlases for several font families, each at a range of sizes around a
/// normal point size.
///
/// Sizes are addressed relative to the normal size: `0` is normal, `-1`
/// one point smaller, `2` two points larger.
#[derive(Debug)]
pub struct FontManager {
    rune_sets: Vec<Vec<char>>,
    normal_size: f32,
    smaller: usize,
    larger: usize,
    families: BTreeMap<FontFamily, Family>,
}

impl FontManager {
    pub fn new(normal_size: f32, smaller: usize, larger: usize, rune_sets: Vec<Vec<char>>) -> Result<Self> {
        if smaller > MAX_SMALLER {
            return Err(Error::InvalidConfig(format!(
                "at most {MAX_SMALLER} smaller font sizes, got {smaller}"
            )));
        }
        if larger > MAX_LARGER {
            return Err(Error::InvalidConfig(format!(
                "at most {MAX_LARGER} larger font sizes, got {larger}"
            )));
        }
        if rune_sets.is_empty() {
            return Err(Error::InvalidConfig("at least one rune set is required".into()));
        }
        if !(normal_size.is_finite() && normal_size - smaller as f32 > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "normal font size {normal_size} leaves no room for {smaller} smaller sizes"
            )));
        }
        Ok(Self {
            rune_sets,
            normal_size,
            smaller,
            larger,
            families: BTreeMap::new(),
        })
    }

    /// Registers TrueType/OpenType data for `family`.
    pub fn add_family(&mut self, family: FontFamily, data: Vec<u8>) -> Result<()> {
        if self.families.contains_key(&family) {
            return Err(Error::DuplicateFamily(family));
        }
        self.families.insert(
            family,
            Family {
                data,
                atlases: Vec::new(),
            },
        );
        Ok(())
    }

    /// Reads font data for `family` from a file.
    pub fn add_family_file(&mut self, family: FontFamily, path: impl AsRef<Path>) -> Result<()> {
        let data = std::fs::read(path)?;
        self.add_family(family, data)
    }

    pub fn has_family(&self, family: FontFamily) -> bool {
        self.families.contains_key(&family)
    }

    pub fn families(&self) -> impl Iterator<Item = FontFamily> + '_ {
        self.families.keys().copied()
    }

    /// Relative sizes built for every family, smallest first.
    pub fn relative_sizes(&self) -> std::ops::RangeInclusive<i32> {
        -(self.smaller as i32)..=self.larger as i32
    }

    pub fn normal_size(&self) -> f32 {
        self.normal_size
    }

    /// Builds and uploads the atlases of every family not built yet, using
    /// [`FontdueFace`] at 72 dpi.
    pub fn build(&mut self, backend: &mut dyn GraphicsBackend) -> Result<()> {
        self.build_with(backend, |_, data, options| {
            Ok(Box::new(FontdueFace::from_bytes(data, options)?) as Box<dyn FontFace>)
        })
    }

    /// Like [`FontManager::build`] with faces created by `load`.
    ///
    /// CPU images are released once uploaded. On error, atlases already
    /// uploaded for the failing family are destroyed.
    pub fn build_with<L>(&mut self, backend: &mut dyn GraphicsBackend, mut load: L) -> Result<()>
    where
        L: FnMut(FontFamily, &[u8], FaceOptions) -> Result<Box<dyn FontFace>>,
    {
        let sizes = self.relative_sizes();
        for (&family, entry) in self.families.iter_mut() {
            if !entry.atlases.is_empty() {
                continue;
            }
            let mut atlases = Vec::with_capacity(self.smaller + self.larger + 1);
            for rel in sizes.clone() {
                let options = FaceOptions {
                    size: self.normal_size + rel as f32,
                    dpi: 72.0,
                };
                let built = load(family, &entry.data, options).and_then(|face| {
                    let mut atlas = FontAtlas::from_boxed(face, &self.rune_sets);
                    atlas.create_texture(backend)?;
                    atlas.release_image()?;
                    Ok(atlas)
                });
                match built {
                    Ok(atlas) => atlases.push(atlas),
                    Err(e) => {
                        for mut atlas in atlases {
                            atlas.destroy(backend);
                        }
                        return Err(e);
                    }
                }
            }
            log::info!("built {} sizes of font family {family:?}", atlases.len());
            entry.atlases = atlases;
        }
        Ok(())
    }

    /// Atlas of `family` at `rel` points from the normal size, clamped to the
    /// built range.
    pub fn font(&self, family: FontFamily, rel: i32) -> Result<&FontAtlas> {
        let entry = self.families.get(&family).ok_or(Error::UnknownFamily(family))?;
        let index = (rel.clamp(-(self.smaller as i32), self.larger as i32) + self.smaller as i32) as usize;
        entry.atlases.get(index).ok_or(Error::FontsNotBuilt(family))
    }

    /// Regular family at the normal size.
    ///
    /// # Panics
    /// Panics when the regular family was not registered and built.
    pub fn default_font(&self) -> &FontAtlas {
        match self.font(FontFamily::Regular, 0) {
            Ok(atlas) => atlas,
            Err(e) => panic!("no default font: {e}"),
        }
    }

    /// Deletes the textures of all atlases. Families stay registered and can
    /// be built again.
    pub fn destroy(&mut self, backend: &mut dyn GraphicsBackend) {
        for entry in self.families.values_mut() {
            for mut atlas in entry.atlases.drain(..) {
                atlas.destroy(backend);
            }
        }
    }
}
