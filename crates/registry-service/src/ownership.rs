use alloy_primitives::Address;
use registry_core::{RegistryError, Result};
use tracing::info;

use crate::registry::Registry;

/// Current admin plus a pending two-step transfer
#[derive(Debug, Clone, Copy)]
pub(crate) struct AdminState {
    pub admin: Address,
    pub future_admin: Option<Address>,
}

impl Registry {
    pub fn admin(&self) -> Address {
        self.admin.read().admin
    }

    pub fn future_admin(&self) -> Option<Address> {
        self.admin.read().future_admin
    }

    pub(crate) fn ensure_admin(&self, caller: Address) -> Result<()> {
        if self.admin.read().admin != caller {
            registry_metrics::counters::mutation_rejected("unauthorized");
            return Err(RegistryError::Unauthorized(caller));
        }
        Ok(())
    }

    /// Stage `new_admin`; takes effect on [`Registry::apply_transfer_ownership`]
    pub async fn commit_transfer_ownership(&self, caller: Address, new_admin: Address) -> Result<()> {
        let _writer = self.writer.lock().await;
        self.ensure_admin(caller)?;
        self.admin.write().future_admin = Some(new_admin);
        info!(admin = ?caller, future_admin = ?new_admin, "Admin transfer committed");
        Ok(())
    }

    pub async fn apply_transfer_ownership(&self, caller: Address) -> Result<()> {
        let _writer = self.writer.lock().await;
        self.ensure_admin(caller)?;
        let mut state = self.admin.write();
        let new_admin = state.future_admin.take().ok_or(RegistryError::NoPendingAdmin)?;
        state.admin = new_admin;
        info!(previous = ?caller, admin = ?new_admin, "Admin transfer applied");
        Ok(())
    }

    pub async fn revert_transfer_ownership(&self, caller: Address) -> Result<()> {
        let _writer = self.writer.lock().await;
        self.ensure_admin(caller)?;
        self.admin.write().future_admin = None;
        Ok(())
    }
}
