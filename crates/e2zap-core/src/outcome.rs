use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Result of one zap invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ZapOutcome {
    /// The box answered the zap request with HTTP 200.
    Ok,
    /// The box answered the zap request with any other status.
    Fail,
    /// The channel is not in the listing; no zap was sent.
    Unknown,
}

impl ZapOutcome {
    /// `ok` iff the status is exactly 200.
    pub fn from_status(status: u16) -> Self {
        if status == 200 { Self::Ok } else { Self::Fail }
    }
}

/// The single record handed back to the hosting framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZapReport {
    pub status: ZapOutcome,
}

impl From<ZapOutcome> for ZapReport {
    fn from(status: ZapOutcome) -> Self {
        Self { status }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn only_200_is_ok() {
        assert_eq!(ZapOutcome::from_status(200), ZapOutcome::Ok);
        for status in [201, 204, 301, 302, 401, 404, 500] {
            assert_eq!(ZapOutcome::from_status(status), ZapOutcome::Fail, "status {status}");
        }
    }

    #[test]
    fn report_serializes_as_status_record() {
        let json = serde_json::to_string(&ZapReport::from(ZapOutcome::Unknown)).unwrap();
        assert_eq!(json, r#"{"status":"unknown"}"#);
    }

    #[test]
    fn outcome_display_matches_wire_form() {
        assert_eq!(ZapOutcome::Ok.to_string(), "ok");
        assert_eq!("fail".parse::<ZapOutcome>().unwrap(), ZapOutcome::Fail);
    }
}
