// Module exports for CLI subcommands
//
// Each module handles one group of subcommands. main.rs parses arguments and
// dispatches to these handlers.

pub mod lookup;
pub mod mcp;
pub mod resolve;
pub mod systems;
