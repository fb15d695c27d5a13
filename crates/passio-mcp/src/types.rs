//! Type definitions for MCP tool inputs
//!
//! Every tool takes required string arguments naming a transportation
//! system and, for two-key tools, a route or stop. Names are free text and
//! are resolved fuzzily, so the schema descriptions tell agents that
//! approximate names are fine.

use rmcp::schemars;
use serde::Deserialize;

use crate::Error;

// ============================================================================
// TOOL INPUTS
// ============================================================================

/// Input for tools keyed by a transportation system only
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct SystemInput {
    /// Name of the transportation system, e.g. "University of Arkansas"
    #[schemars(description = "Transportation system name (approximate names are matched)")]
    pub transportation_system_name: String,
}

/// Input for get_route_from_transportation_system
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct RouteInput {
    /// Name of the transportation system
    #[schemars(description = "Transportation system name (approximate names are matched)")]
    pub transportation_system_name: String,

    /// Name of the route within the system
    #[schemars(description = "Route name, e.g. \"21\" or \"Tech Trolley\"")]
    pub route_name: String,
}

/// Input for get_stop_from_transportation_system
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct StopInput {
    /// Name of the stop within the system
    #[schemars(description = "Stop name (approximate names are matched)")]
    pub stop_name: String,

    /// Name of the transportation system
    #[schemars(description = "Transportation system name (approximate names are matched)")]
    pub transportation_system_name: String,
}

/// Input for get_stops_from_route
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct RouteStopsInput {
    /// Name of the route whose stops are listed
    #[schemars(description = "Route name (approximate names are matched)")]
    pub route_name: String,

    /// Name of the transportation system
    #[schemars(description = "Transportation system name (approximate names are matched)")]
    pub transportation_system_name: String,
}

/// Longest accepted name argument, in characters
pub const MAX_ARGUMENT_LEN: usize = 256;

/// Reject blank or oversized required arguments before any lookup happens
fn require(param: &str, value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_param(param, "Cannot be empty"));
    }
    if value.chars().count() > MAX_ARGUMENT_LEN {
        return Err(Error::invalid_param(
            param,
            format!("Must be at most {} characters", MAX_ARGUMENT_LEN),
        ));
    }
    Ok(())
}

impl SystemInput {
    pub fn validate(&self) -> crate::Result<()> {
        require("transportation_system_name", &self.transportation_system_name)
    }
}

impl RouteInput {
    pub fn validate(&self) -> crate::Result<()> {
        require("transportation_system_name", &self.transportation_system_name)?;
        require("route_name", &self.route_name)
    }
}

impl StopInput {
    pub fn validate(&self) -> crate::Result<()> {
        require("stop_name", &self.stop_name)?;
        require("transportation_system_name", &self.transportation_system_name)
    }
}

impl RouteStopsInput {
    pub fn validate(&self) -> crate::Result<()> {
        require("route_name", &self.route_name)?;
        require("transportation_system_name", &self.transportation_system_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_input_deserialization() {
        let json = r#"{
            "transportation_system_name": "University of Arkansas",
            "route_name": "21"
        }"#;

        let input: RouteInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.transportation_system_name, "University of Arkansas");
        assert_eq!(input.route_name, "21");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_missing_argument_is_rejected() {
        let json = r#"{ "stop_name": "Student Union" }"#;
        assert!(serde_json::from_str::<StopInput>(json).is_err());
    }

    #[test]
    fn test_blank_argument_fails_validation() {
        let input = RouteStopsInput {
            route_name: "  ".to_string(),
            transportation_system_name: "Georgia Tech".to_string(),
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.code, 400);
        assert_eq!(err.context.unwrap()["parameter"], "route_name");
    }

    #[test]
    fn test_oversized_argument_fails_validation() {
        let input = StopInput {
            stop_name: "x".repeat(MAX_ARGUMENT_LEN + 1),
            transportation_system_name: "Georgia Tech".to_string(),
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.code, 400);
        assert_eq!(err.context.unwrap()["parameter"], "stop_name");

        let at_limit = StopInput {
            stop_name: "é".repeat(MAX_ARGUMENT_LEN),
            transportation_system_name: "Georgia Tech".to_string(),
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_system_input_validation() {
        let input = SystemInput {
            transportation_system_name: String::new(),
        };
        assert!(input.validate().is_err());
    }
}
