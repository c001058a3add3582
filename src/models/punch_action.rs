use serde::Serialize;

/// Direction of a punch: clocking in or clocking out.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PunchAction {
    In,
    Out,
}

impl PunchAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PunchAction::In => "in",
            PunchAction::Out => "out",
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, PunchAction::In)
    }

    pub fn is_out(&self) -> bool {
        matches!(self, PunchAction::Out)
    }
}
