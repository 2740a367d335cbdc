use super::*;

/// Any mirror facet, or a group of them.
///
/// Groups own their children, so a `Facet` is always a finite tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Facet {
    Arc(CircularArc),
    Parabola(Parabola),
    Composite(Composite<Facet>),
}

impl Facet {
    /// Number of arcs and parabolas in this tree
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Arc(_) | Self::Parabola(_) => 1,
            Self::Composite(group) => group.children().iter().map(Self::leaf_count).sum(),
        }
    }
}

impl Shape for Facet {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        match self {
            Self::Arc(arc) => arc.intersect(ray),
            Self::Parabola(parabola) => parabola.intersect(ray),
            Self::Composite(group) => group.intersect(ray),
        }
    }
}

impl From<CircularArc> for Facet {
    fn from(arc: CircularArc) -> Self {
        Self::Arc(arc)
    }
}

impl From<Parabola> for Facet {
    fn from(parabola: Parabola) -> Self {
        Self::Parabola(parabola)
    }
}

impl From<Composite<Facet>> for Facet {
    fn from(group: Composite<Facet>) -> Self {
        Self::Composite(group)
    }
}
