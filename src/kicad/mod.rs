//! KiCad footprint model and `.kicad_mod` output.
//!
//! A [`Footprint`] collects drawing [`Primitive`]s in the order the series
//! generators emit them. [`FootprintLibrary`] writes footprints into
//! `{library}.pretty/` directories under an output root:
//!
//! ```text
//! output/
//! ├── Connector_FFC-FPC.pretty/
//! │   ├── Molex_52207-0360_1x03-1MP_P1.00mm_Horizontal.kicad_mod
//! │   └── ...
//! └── Connector_PhoenixContact.pretty/
//!     └── ...
//! ```

pub mod error;
pub mod primitives;
mod writer;

use std::path::PathBuf;

pub use error::{KicadError, KicadResult};
pub use primitives::{
    Circle, Layer, Model3d, Pad, PadShape, PadType, Point, PolyLine, Primitive, Rect, Text,
    TextKind,
};
pub use writer::{num, quote, write_footprint};

/// Footprint placement attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// Surface mount part (included in placement files).
    Smd,
}

impl Attribute {
    /// Returns the KiCad keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smd => "smd",
        }
    }
}

/// A complete footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    /// Footprint name; also the file stem.
    pub name: String,

    /// Description (`descr`).
    pub description: String,

    /// Space-separated keywords (`tags`).
    pub tags: String,

    /// Placement attribute; `None` for through-hole parts.
    pub attribute: Option<Attribute>,

    /// Drawing primitives in emission order.
    pub primitives: Vec<Primitive>,

    /// 3D model reference.
    pub model: Option<Model3d>,
}

impl Footprint {
    /// Creates a new empty footprint with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tags: String::new(),
            attribute: None,
            primitives: Vec::new(),
            model: None,
        }
    }

    /// Sets the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Sets the keyword tags.
    pub fn set_tags(&mut self, tags: impl Into<String>) {
        self.tags = tags.into();
    }

    /// Sets the placement attribute.
    pub fn set_attribute(&mut self, attribute: Attribute) {
        self.attribute = Some(attribute);
    }

    /// Sets the 3D model reference.
    pub fn set_model(&mut self, model: Model3d) {
        self.model = Some(model);
    }

    /// Appends a primitive.
    pub fn append(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Appends several primitives.
    pub fn extend<P: Into<Primitive>>(&mut self, primitives: impl IntoIterator<Item = P>) {
        self.primitives
            .extend(primitives.into_iter().map(Into::into));
    }

    /// Returns the pads in emission order.
    pub fn pads(&self) -> impl Iterator<Item = &Pad> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Pad(pad) => Some(pad),
            _ => None,
        })
    }

    /// Returns the primitives drawn on `layer`.
    pub fn on_layer(&self, layer: Layer) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(move |p| p.layer() == Some(layer))
    }

    /// Serialises the footprint to `.kicad_mod` text.
    #[must_use]
    pub fn to_kicad_mod(&self) -> String {
        write_footprint(self)
    }
}

/// Output root holding one `.pretty` directory per library.
#[derive(Debug, Clone)]
pub struct FootprintLibrary {
    root: PathBuf,
}

impl FootprintLibrary {
    /// Creates a library writer rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the `.pretty` directory for a library.
    #[must_use]
    pub fn library_dir(&self, lib_name: &str) -> PathBuf {
        self.root.join(format!("{lib_name}.pretty"))
    }

    /// Writes a footprint to `{root}/{lib_name}.pretty/{name}.kicad_mod`,
    /// creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn write(&self, lib_name: &str, footprint: &Footprint) -> KicadResult<PathBuf> {
        let dir = self.library_dir(lib_name);
        std::fs::create_dir_all(&dir).map_err(|e| KicadError::create_dir(&dir, e))?;

        let path = dir.join(format!("{}.kicad_mod", footprint.name));
        std::fs::write(&path, footprint.to_kicad_mod())
            .map_err(|e| KicadError::file_write(&path, e))?;

        tracing::debug!(path = %path.display(), "Wrote footprint");
        Ok(path)
    }
}
