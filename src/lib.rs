//=========================================================================
// Proscenium — Library Root
//
// This crate defines the public API surface of Proscenium, a stacked
// scene-transition orchestrator.
//
// Responsibilities:
// - Expose the top-level runtime facade (`Director`)
// - Expose the core orchestration systems (`core`) for engine-level
//   extensibility: the navigation stack, loading screen lifecycle and
//   the loader seam
// - Provide clean separation between the high-level facade and the
//   lower-level subsystems
//
// Typical usage:
// ```no_run
// use std::time::Duration;
// use proscenium::{DirectorBuilder, PushRequest};
// # fn engine_loader() -> Box<dyn proscenium::core::loader::SceneLoader> { unimplemented!() }
//
// let mut director = DirectorBuilder::new()
//     .with_bootstrap_scene("Boot")
//     .build(engine_loader());
//
// director.push(PushRequest::new("level1", "fade")).unwrap();
//
// // once per render frame:
// director.tick(Duration::from_millis(16)).unwrap();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the orchestration systems (navigation stack, loading
// screens, loader seam). It is exposed publicly for engine-level
// extensibility, but normal application code will mostly use the
// top-level `Director` facade and the `prelude`.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `director` defines the runtime facade and its builder.
//
mod director;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the facade and the request types most applications touch,
// so users can `use proscenium::{DirectorBuilder, PushRequest};` without
// knowing the internal module structure.
//
pub use crate::core::scene::{PopRequest, PushRequest, TransitionConfig};
pub use director::{Director, DirectorBuilder};
