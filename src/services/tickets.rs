use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{TicketStatusFilter, TicketView};
use crate::repositories::{RepoError, TicketStore};

#[derive(Clone)]
pub struct TicketService {
    store: Arc<dyn TicketStore>,
}

impl TicketService {
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self { store }
    }

    pub async fn my_tickets(&self, user_id: i64, filter: TicketStatusFilter) -> AppResult<Vec<TicketView>> {
        Ok(self.store.list_by_user(user_id, filter).await?)
    }

    /// Чужой билет выглядит так же, как несуществующий.
    pub async fn ticket_detail(&self, user_id: i64, ticket_id: i64) -> AppResult<TicketView> {
        let not_found = || AppError::NotFound(format!("ticket {} not found", ticket_id));
        match self.store.find_by_id(ticket_id).await {
            Ok(view) if view.ticket.user_id == user_id => Ok(view),
            Ok(_) | Err(RepoError::NotFound(_)) => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }
}
