//! Procedural generator for game-ready crater meshes
//!
//! Builds explosion and impact craters as concentric deformed rings:
//! an outer skirt, a raised rim and a bowl, with optional edge rounding,
//! blast asymmetry, outline irregularity and rim fragmentation, an
//! optional closed underside, a noise detail pass, topology cleanup down
//! to clean triangles and a two-zone material classification.
//!
//! # Example
//! ```no_run
//! use crater_gen::generate::generate;
//! use crater_gen::mesh::write_obj;
//! use crater_gen::params::CraterParams;
//!
//! let params = CraterParams {
//!     edge_fragmentation: 40.0,
//!     blast_asymmetry: 0.3,
//!     ..CraterParams::default()
//! };
//!
//! let build = generate(&params);
//! println!(
//!     "{} vertices, {} triangles",
//!     build.report.vertices, build.report.faces
//! );
//! write_obj(&build.mesh, "crater.obj", "crater")?;
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! Deterministic generation pins both sources of randomness:
//! ```
//! use crater_gen::field::PerlinField;
//! use crater_gen::generate::generate_crater;
//! use crater_gen::params::CraterParams;
//! use rand::SeedableRng;
//!
//! let field = PerlinField::new(7);
//! let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
//! let build = generate_crater(&CraterParams::default(), &field, &mut rng);
//! assert!(build.report.faces > 0);
//! ```

pub mod field;
pub mod generate;
pub mod mesh;
pub mod params;
