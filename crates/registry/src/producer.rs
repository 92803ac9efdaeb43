use serde::{Deserialize, Serialize};

use agroreg_core::{DomainError, DomainResult, Entity, ProducerId};
use agroreg_documents::TaxId;

/// A rural producer: a natural or legal person identified by a tax document.
///
/// The tax id is fixed at creation; only the display name changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Producer {
    id: ProducerId,
    tax_id: TaxId,
    name: String,
}

impl Producer {
    pub fn new(id: ProducerId, tax_id: TaxId, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        ensure_name(&name)?;
        Ok(Self { id, tax_id, name })
    }

    pub fn tax_id(&self) -> &TaxId {
        &self.tax_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn renamed(&self, name: impl Into<String>) -> DomainResult<Self> {
        Self::new(self.id, self.tax_id.clone(), name)
    }
}

impl Entity for Producer {
    type Id = ProducerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn ensure_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}
