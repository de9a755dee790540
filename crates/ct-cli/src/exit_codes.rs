//! Exit codes for the `ct` binary
//!
//! These follow Unix conventions and sysexits.h where applicable.

/// General error, or one or more charts failed
pub const ERROR: i32 = 1;

/// Invalid configuration (config file or flags)
pub const CONFIG_ERROR: i32 = 2;

/// An external tool (git, helm, kubectl, ...) failed outside a chart
pub const TOOL_ERROR: i32 = 3;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;
