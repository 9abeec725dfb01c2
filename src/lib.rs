//! Extruded 3D text meshes from TrueType glyph outlines.
//!
//! The pipeline runs in four stages: glyph outlines are flattened into
//! positioned planar contours ([`outline`]), contours are classified into
//! fills and the holes nested inside them ([`contour`]), each fill region
//! is triangulated into a flat cap ([`tessellate`]), and finally caps and
//! contour rims are extruded into a closed triangle mesh ([`mesher`]).
//!
//! Both external collaborators sit behind traits ([`OutlineSource`],
//! [`PolygonTessellator`]) so the pipeline can run against test doubles
//! without a font file or a tessellation backend.
//!
//! ```no_run
//! use glyphforge::TextMesher;
//!
//! let mut mesher = TextMesher::new("fonts/en.ttf", 48.0);
//! let mesh = mesher.generate("Hello", 0.0, 0.0, 8.0).expect("drawable text");
//! println!("{} triangles", mesh.triangle_count());
//! ```

pub mod contour;
pub mod error;
pub mod layout;
pub mod mesh;
pub mod mesher;
pub mod outline;
pub mod tessellate;
pub mod validate;

pub use contour::{signed_area, CharacterOutline, Contour};
pub use error::{MesherResult, TextMeshError};
pub use layout::LayoutState;
pub use mesh::MeshBuffers;
pub use mesher::TextMesher;
pub use outline::{FontOutlineSource, OutlineSource, DEFAULT_BEZIER_STEPS};
pub use tessellate::{CapTriangles, FillCapTessellator, PolygonTessellator};
pub use validate::{validate_mesh, MeshStats, MeshValidationIssue, MeshValidationReport};
