use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};

use super::{Persist, upsert, upsert_all};
use crate::activity::{Issue, IssueRows};
use crate::entity::prelude::*;

fn issue_conflict() -> OnConflict {
    OnConflict::column(IssueColumn::Id)
        .update_columns([
            IssueColumn::Title,
            IssueColumn::Body,
            IssueColumn::Author,
            IssueColumn::AuthorAssociation,
            IssueColumn::Labels,
            IssueColumn::CreatedAt,
            IssueColumn::PublishedAt,
            IssueColumn::UpdatedAt,
            IssueColumn::LastEditedAt,
            IssueColumn::ClosedAt,
            IssueColumn::State,
            IssueColumn::Locked,
            IssueColumn::Closed,
            IssueColumn::ClosedBy,
        ])
        .to_owned()
}

fn reaction_conflict() -> OnConflict {
    OnConflict::columns([IssueReactionColumn::Issue, IssueReactionColumn::Reaction])
        .update_column(IssueReactionColumn::Count)
        .to_owned()
}

fn comment_conflict() -> OnConflict {
    OnConflict::column(IssueCommentColumn::Id)
        .update_columns([
            IssueCommentColumn::Issue,
            IssueCommentColumn::Author,
            IssueCommentColumn::AuthorAssociation,
            IssueCommentColumn::Body,
            IssueCommentColumn::CreatedAt,
            IssueCommentColumn::PublishedAt,
            IssueCommentColumn::UpdatedAt,
            IssueCommentColumn::LastEditedAt,
        ])
        .to_owned()
}

fn comment_reaction_conflict() -> OnConflict {
    OnConflict::columns([
        IssueCommentReactionColumn::Issue,
        IssueCommentReactionColumn::Comment,
        IssueCommentReactionColumn::Reaction,
    ])
    .update_column(IssueCommentReactionColumn::Count)
    .to_owned()
}

/// Write an issue's rows on an open connection or transaction.
pub(crate) async fn write_issue<C: ConnectionTrait>(conn: &C, rows: IssueRows) -> Result<(), DbErr> {
    let IssueRows {
        issue,
        reactions,
        comments,
        comment_reactions,
    } = rows;

    upsert(conn, issue, &issue_conflict()).await?;
    upsert_all(conn, reactions, &reaction_conflict()).await?;
    upsert_all(conn, comments, &comment_conflict()).await?;
    upsert_all(conn, comment_reactions, &comment_reaction_conflict()).await?;
    Ok(())
}

#[async_trait]
impl Persist for Issue {
    async fn persist(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let txn = db.begin().await?;
        write_issue(&txn, self.to_rows()).await?;
        txn.commit().await?;
        tracing::debug!(id = %self.id, number = self.number, "Committed issue");
        Ok(())
    }
}
