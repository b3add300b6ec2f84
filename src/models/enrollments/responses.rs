use serde::Serialize;

/// 一次选课同步产生的增删数量
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct RosterDelta {
    pub added: usize,
    pub removed: usize,
}

impl RosterDelta {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}
