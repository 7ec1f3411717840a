//! SURF records: polygons, lines and closed lines

use nalgebra::Vector2;

bitflags::bitflags! {
    // SURF flags: low nibble is the surface type, high bits are attributes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SurfaceFlags: u32 {
        /// Mask of the surface type nibble
        const TYPE_MASK = 0x0F;
        /// Type nibble value of an open line
        const LINE = 0x01;
        /// Type nibble value of a closed line
        const CLOSED_LINE = 0x02;
        /// Smooth shaded
        const SMOOTH = 0x10;
        /// Not back-face culled
        const TWO_SIDED = 0x20;
    }
}

/// Primitive kind selected by the type nibble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceType {
    Polygon,
    Line,
    ClosedLine,
}

impl SurfaceType {
    /// Decode a type nibble
    pub fn from_nibble(nibble: u32) -> Option<Self> {
        match nibble {
            0 => Some(SurfaceType::Polygon),
            1 => Some(SurfaceType::Line),
            2 => Some(SurfaceType::ClosedLine),
            _ => None,
        }
    }

    /// Type nibble value
    pub fn nibble(&self) -> u32 {
        match self {
            SurfaceType::Polygon => 0,
            SurfaceType::Line => 1,
            SurfaceType::ClosedLine => 2,
        }
    }

    /// Lines and closed lines
    pub fn is_line(&self) -> bool {
        !matches!(self, SurfaceType::Polygon)
    }

    /// Smallest number of refs that makes a non-degenerate surface
    pub fn min_refs(&self) -> usize {
        match self {
            SurfaceType::Polygon => 3,
            SurfaceType::Line | SurfaceType::ClosedLine => 2,
        }
    }
}

impl SurfaceFlags {
    /// Compose flags from a type and the two attributes
    pub fn compose(surface_type: SurfaceType, smooth: bool, two_sided: bool) -> Self {
        let mut flags = SurfaceFlags::from_bits_retain(surface_type.nibble());
        flags.set(SurfaceFlags::SMOOTH, smooth);
        flags.set(SurfaceFlags::TWO_SIDED, two_sided);
        flags
    }

    /// Surface type, `None` for nibble values the format does not define
    pub fn surface_type(&self) -> Option<SurfaceType> {
        SurfaceType::from_nibble(self.bits() & SurfaceFlags::TYPE_MASK.bits())
    }

    pub fn is_smooth(&self) -> bool {
        self.contains(SurfaceFlags::SMOOTH)
    }

    pub fn is_two_sided(&self) -> bool {
        self.contains(SurfaceFlags::TWO_SIDED)
    }
}

impl Default for SurfaceFlags {
    fn default() -> Self {
        SurfaceFlags::empty()
    }
}

/// One `refs` entry: vertex index plus texture coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRef {
    pub vertex: usize,
    pub uv: Vector2<f64>,
}

impl SurfaceRef {
    pub fn new(vertex: usize, u: f64, v: f64) -> Self {
        Self {
            vertex,
            uv: Vector2::new(u, v),
        }
    }

    /// Ref without texture coordinate, as used by lines
    pub fn untextured(vertex: usize) -> Self {
        Self::new(vertex, 0.0, 0.0)
    }
}

/// A SURF block
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    /// Raw flag bits, including bits the codec does not interpret
    pub flags: SurfaceFlags,
    /// Index into the material table
    pub material: usize,
    pub refs: Vec<SurfaceRef>,
}

impl Surface {
    pub fn new(flags: SurfaceFlags, material: usize) -> Self {
        Self {
            flags,
            material,
            refs: Vec::new(),
        }
    }

    /// Polygon surface over the given refs
    pub fn polygon(material: usize, refs: Vec<SurfaceRef>) -> Self {
        Self {
            flags: SurfaceFlags::compose(SurfaceType::Polygon, false, false),
            material,
            refs,
        }
    }

    /// Surface type, `None` when the flags carry an undefined type nibble
    pub fn surface_type(&self) -> Option<SurfaceType> {
        self.flags.surface_type()
    }

    /// Fewer refs than the surface type needs
    pub fn is_degenerate(&self) -> bool {
        match self.surface_type() {
            Some(ty) => self.refs.len() < ty.min_refs(),
            None => false,
        }
    }

    /// Largest referenced vertex index
    pub fn max_vertex(&self) -> Option<usize> {
        self.refs.iter().map(|r| r.vertex).max()
    }
}
