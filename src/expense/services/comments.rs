//! Service layer for comments and owner notification.

use super::{ExpenseServiceError, ExpenseServiceResult};
use crate::authz::domain::Actor;
use crate::expense::{
    domain::{Comment, CommentView, Expense, ExpenseId, ProfileDirectory, policy},
    ports::{
        CommentNotification, CommentNotifier, CommentPublisher, CommentRepository,
        ExpenseRepository, ExpenseRepositoryResult,
    },
};
use crate::profile::{domain::Username, ports::ProfileRepository};
use async_trait::async_trait;
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Comment orchestration service.
#[derive(Clone)]
pub struct CommentService<M, E, P, N, K>
where
    M: CommentRepository,
    E: ExpenseRepository,
    P: ProfileRepository,
    N: CommentNotifier,
    K: Clock + Send + Sync,
{
    comments: Arc<M>,
    expenses: Arc<E>,
    profiles: Arc<P>,
    notifier: Arc<N>,
    clock: Arc<K>,
}

impl<M, E, P, N, K> CommentService<M, E, P, N, K>
where
    M: CommentRepository,
    E: ExpenseRepository,
    P: ProfileRepository,
    N: CommentNotifier,
    K: Clock + Send + Sync,
{
    /// Creates a new comment service.
    #[must_use]
    pub const fn new(
        comments: Arc<M>,
        expenses: Arc<E>,
        profiles: Arc<P>,
        notifier: Arc<N>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            comments,
            expenses,
            profiles,
            notifier,
            clock,
        }
    }

    async fn visible_expense(
        &self,
        actor: &Actor,
        id: ExpenseId,
    ) -> ExpenseServiceResult<Expense> {
        let expense = self
            .expenses
            .find_by_id(id)
            .await?
            .ok_or(ExpenseServiceError::ExpenseNotFound(id))?;
        if !policy::may_view(actor, &expense) {
            return Err(ExpenseServiceError::forbidden(actor.username(), "comment on this expense"));
        }
        Ok(expense)
    }

    /// Posts a comment on an expense the actor may see.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Forbidden`] when the actor may not view
    /// the expense and [`ExpenseServiceError::Domain`] for empty content.
    pub async fn post(
        &self,
        actor: &Actor,
        expense: ExpenseId,
        content: &str,
    ) -> ExpenseServiceResult<Comment> {
        let target = self.visible_expense(actor, expense).await?;
        let comment = Comment::new(expense, actor.username().clone(), content, &*self.clock)?;
        self.publish(&target, &comment).await?;
        Ok(comment)
    }

    /// Lists the comments on an expense, oldest first, with author names.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseServiceError::Forbidden`] when the actor may not view
    /// the expense.
    pub async fn list(
        &self,
        actor: &Actor,
        expense: ExpenseId,
    ) -> ExpenseServiceResult<Vec<CommentView>> {
        self.visible_expense(actor, expense).await?;
        let comments = self.comments.list_by_expense(expense).await?;
        let authors: BTreeSet<Username> =
            comments.iter().map(|comment| comment.author().clone()).collect();
        let mut profiles = Vec::with_capacity(authors.len());
        for author in &authors {
            profiles.extend(self.profiles.find_by_username(author).await?);
        }
        let directory = ProfileDirectory::new(profiles);
        Ok(comments
            .iter()
            .map(|comment| CommentView::new(comment, &directory))
            .collect())
    }

    async fn notify_owner(&self, expense: &Expense, comment: &Comment) {
        let owner = match self.profiles.find_by_username(expense.owner()).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                tracing::warn!(
                    owner = %expense.owner(),
                    "expense owner has no profile; not notified"
                );
                return;
            }
            Err(error) => {
                tracing::warn!(
                    owner = %expense.owner(),
                    %error,
                    "owner lookup failed; not notified"
                );
                return;
            }
        };
        let author_name = match self.profiles.find_by_username(comment.author()).await {
            Ok(Some(profile)) => profile.display_name(),
            _ => comment.author().to_string(),
        };
        let notification = CommentNotification {
            to: owner.identity().email.clone(),
            receiver_name: owner.display_name(),
            author_name,
            expense_id: expense.id().to_string(),
            expense_description: expense.description().to_owned(),
            content: comment.content().to_owned(),
        };
        if let Err(error) = self.notifier.notify(&notification).await {
            tracing::warn!(comment = %comment.id(), %error, "failed to notify expense owner");
        }
    }
}

#[async_trait]
impl<M, E, P, N, K> CommentPublisher for CommentService<M, E, P, N, K>
where
    M: CommentRepository,
    E: ExpenseRepository,
    P: ProfileRepository,
    N: CommentNotifier,
    K: Clock + Send + Sync,
{
    async fn publish(&self, expense: &Expense, comment: &Comment) -> ExpenseRepositoryResult<()> {
        self.comments.store(comment).await?;
        tracing::debug!(comment = %comment.id(), expense = %expense.id(), "stored comment");
        if comment.author() != expense.owner() {
            self.notify_owner(expense, comment).await;
        }
        Ok(())
    }
}
