// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive tool.
//
// Module responsibilities:
// - `api`: Encapsulates HTTP interactions with the two remote services
//   (Polkassembly referendum data, OpenAI-compatible summarization).
// - `cli`: The clap command surface and version lookup.
// - `ui`: Implements the interactive menu loop and the command handlers,
//   delegating requests to `api`.
//
// Keeping this separation makes it easier to test the handlers against
// fake clients and the HTTP clients against a mock server.
pub mod api;
pub mod cli;
pub mod ui;
