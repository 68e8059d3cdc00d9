//! Static reference data: celestial body layout and resume section content.
pub mod bodies;
pub mod sections;

pub use bodies::{BodySpec, BODIES};
pub use sections::{PanelBody, PanelContent, Section, SectionLayout, SectionTable};
