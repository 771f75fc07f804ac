use serde::Deserialize;
use tracing::error;

use super::{Phase, Prompt, STORAGE_NOTICE};
use crate::db::merch::{MerchItem, NewMerch};
use crate::error::AppError;
use crate::repository::merch::NEGATIVE_STOCK_MESSAGE;
use crate::repository::MerchRepository;
use crate::validation::{parse_price, parse_stock, require_text};

/// Raw text of the add-item form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MerchForm {
    pub name: String,
    pub price: String,
    pub stock: String,
}

impl MerchForm {
    /// Name is required; price and stock fall back to 0
    pub fn to_new_merch(&self) -> Result<NewMerch, AppError> {
        Ok(NewMerch {
            name: require_text(&self.name, "Item name is required")?,
            price: parse_price(&self.price),
            stock: parse_stock(&self.stock),
        })
    }
}

pub struct MerchScreen {
    repo: MerchRepository,
    pub form: MerchForm,
    items: Vec<MerchItem>,
    phase: Phase,
}

impl MerchScreen {
    pub fn new(repo: MerchRepository) -> Self {
        Self {
            repo,
            form: MerchForm::default(),
            items: Vec::new(),
            phase: Phase::Idle,
        }
    }

    pub fn items(&self) -> &[MerchItem] {
        &self.items
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn storage_notice(&self) -> Option<&'static str> {
        (!self.repo.is_available()).then_some(STORAGE_NOTICE)
    }

    pub fn is_sold_out(item: &MerchItem) -> bool {
        item.stock == 0
    }

    /// Reload the list. On failure the previous list is kept.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        match self.repo.list().await {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(e) => {
                error!("Error loading merch: {}", e);
                Err(e)
            }
        }
    }

    pub async fn submit(&mut self) -> Result<i64, Prompt> {
        let item = self.form.to_new_merch()?;

        self.phase = Phase::Submitting;
        let result = self.repo.add(item).await;
        self.phase = Phase::Idle;

        let id = result?;
        self.form = MerchForm::default();
        let _ = self.refresh().await;
        Ok(id)
    }

    pub fn request_delete(&self, _id: i64) -> Prompt {
        Prompt::confirm(
            "Delete Item",
            "Are you sure you want to delete this item?",
            "Delete",
        )
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), Prompt> {
        self.repo.delete(id).await?;
        let _ = self.refresh().await;
        Ok(())
    }

    /// Increment or decrement the stock of a listed item.
    ///
    /// A result below zero is refused here, before the repository is called.
    pub async fn adjust_stock(&mut self, id: i64, delta: i64) -> Result<i64, Prompt> {
        let item = self
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| Prompt::error("Item not found"))?;

        match item.stock.checked_add(delta) {
            Some(stock) if stock >= 0 => {}
            _ => return Err(Prompt::error(NEGATIVE_STOCK_MESSAGE)),
        }

        let stock = self.repo.adjust_stock(&item, delta).await?;
        let _ = self.refresh().await;
        Ok(stock)
    }
}
