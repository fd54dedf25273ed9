//! Delete confirmation: one selection slot, visible exactly while armed

use crate::domain::vehicle::VehicleId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteConfirm {
    #[default]
    Idle,
    Armed(VehicleId),
}

impl DeleteConfirm {
    pub fn arm(&mut self, id: VehicleId) {
        *self = DeleteConfirm::Armed(id);
    }

    /// Hide the surface and hand back the target, if one was armed
    pub fn confirm(&mut self) -> Option<VehicleId> {
        match std::mem::take(self) {
            DeleteConfirm::Armed(id) => Some(id),
            DeleteConfirm::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = DeleteConfirm::Idle;
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, DeleteConfirm::Armed(_))
    }

    pub fn selected(&self) -> Option<&VehicleId> {
        match self {
            DeleteConfirm::Armed(id) => Some(id),
            DeleteConfirm::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_takes_target_once() {
        let mut confirm = DeleteConfirm::default();
        confirm.arm(VehicleId::from(5));
        assert!(confirm.is_visible());
        assert_eq!(confirm.selected(), Some(&VehicleId::from(5)));

        assert_eq!(confirm.confirm(), Some(VehicleId::from(5)));
        assert_eq!(confirm, DeleteConfirm::Idle);
        assert_eq!(confirm.confirm(), None);
    }

    #[test]
    fn test_cancel_clears_selection() {
        let mut confirm = DeleteConfirm::default();
        confirm.arm(VehicleId::from(5));
        confirm.cancel();
        assert!(!confirm.is_visible());
        assert_eq!(confirm.selected(), None);
        confirm.cancel();
        assert_eq!(confirm, DeleteConfirm::Idle);
    }
}
