//! MATERIAL records

use crate::types::Rgb;

/// Name the exporter gives its fallback material
pub const DEFAULT_MATERIAL_NAME: &str = "DefaultWhite";

/// Upper bound of the `shi` field
pub const MAX_SHININESS: i32 = 128;

/// One `MATERIAL` line.
///
/// Materials are identified by their position in [`SceneGraph::materials`];
/// surfaces refer to them by that index.
///
/// [`SceneGraph::materials`]: crate::scene::SceneGraph::materials
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// `rgb`, the diffuse colour
    pub diffuse: Rgb,
    /// `amb`
    pub ambient: Rgb,
    /// `emis`
    pub emissive: Rgb,
    /// `spec`
    pub specular: Rgb,
    /// `shi`, 0..=128
    pub shininess: i32,
    /// `trans`, 0 is opaque
    pub transparency: f64,
    /// Mirror colour supplied by a host adapter. Never read from a file;
    /// written in place of `emis` when the writer runs with
    /// `mirror_as_emissive`.
    pub mirror: Option<Rgb>,
    /// Tokens after `trans` that the codec does not model, verbatim
    pub extra_tokens: Vec<String>,
}

impl Material {
    /// Create a material with the given name and default channels
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Opacity, `1 - transparency`
    pub fn alpha(&self) -> f64 {
        1.0 - self.transparency
    }

    /// Whether the material lets light through
    pub fn is_transparent(&self) -> bool {
        self.transparency > 0.0
    }

    /// Single ambient factor for hosts that only keep an intensity
    pub fn ambient_intensity(&self) -> f64 {
        self.ambient.mean()
    }

    /// Single emission factor for hosts that only keep an intensity
    pub fn emission_intensity(&self) -> f64 {
        self.emissive.mean()
    }

    /// Shininess scaled to `0.0..=1.0`
    pub fn specular_intensity(&self) -> f64 {
        f64::from(self.shininess.clamp(0, MAX_SHININESS)) / f64::from(MAX_SHININESS)
    }

    /// Colour a host should use as mirror colour.
    ///
    /// Legacy exporters store the mirror colour in the `emis` channel; with
    /// `mirror_as_emissive` set that channel is returned, otherwise `spec`.
    pub fn mirror_color(&self, mirror_as_emissive: bool) -> Rgb {
        if mirror_as_emissive {
            self.emissive
        } else {
            self.specular
        }
    }

    /// Emissive channel as it should be written for the given option
    pub fn written_emissive(&self, mirror_as_emissive: bool) -> Rgb {
        match self.mirror {
            Some(mirror) if mirror_as_emissive => mirror,
            _ => self.emissive,
        }
    }

    /// Ambient channel as it should be written for the given option
    pub fn written_ambient(&self, mirror_as_ambient: bool) -> Rgb {
        match self.mirror {
            Some(mirror) if mirror_as_ambient => mirror,
            _ => self.ambient,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: DEFAULT_MATERIAL_NAME.to_string(),
            diffuse: Rgb::WHITE,
            ambient: Rgb::WHITE,
            emissive: Rgb::BLACK,
            specular: Rgb::gray(0.5),
            shininess: 10,
            transparency: 0.0,
            mirror: None,
            extra_tokens: Vec::new(),
        }
    }
}
