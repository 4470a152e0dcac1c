use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};

use super::{Persist, upsert, upsert_all};
use crate::activity::{PullRequest, PullRequestRows};
use crate::entity::prelude::*;

fn pull_request_conflict() -> OnConflict {
    OnConflict::column(PullRequestColumn::Id)
        .update_columns([
            PullRequestColumn::Title,
            PullRequestColumn::Body,
            PullRequestColumn::Author,
            PullRequestColumn::AuthorAssociation,
            PullRequestColumn::Labels,
            PullRequestColumn::CreatedAt,
            PullRequestColumn::PublishedAt,
            PullRequestColumn::UpdatedAt,
            PullRequestColumn::LastEditedAt,
            PullRequestColumn::ClosedAt,
            PullRequestColumn::MergedAt,
            PullRequestColumn::State,
            PullRequestColumn::Locked,
            PullRequestColumn::Closed,
            PullRequestColumn::ClosedBy,
            PullRequestColumn::Merged,
            PullRequestColumn::MergedBy,
            PullRequestColumn::Mergeable,
            PullRequestColumn::ReviewDecision,
            PullRequestColumn::Additions,
            PullRequestColumn::Deletions,
            PullRequestColumn::ChangedFiles,
            PullRequestColumn::BaseRefName,
            PullRequestColumn::HeadRefName,
        ])
        .to_owned()
}

fn reaction_conflict() -> OnConflict {
    OnConflict::columns([
        PullRequestReactionColumn::Pullrequest,
        PullRequestReactionColumn::Reaction,
    ])
    .update_column(PullRequestReactionColumn::Count)
    .to_owned()
}

fn review_conflict() -> OnConflict {
    OnConflict::columns([
        PullRequestReviewColumn::Pullrequest,
        PullRequestReviewColumn::Author,
    ])
    .update_columns([
        PullRequestReviewColumn::AuthorAssociation,
        PullRequestReviewColumn::Body,
        PullRequestReviewColumn::State,
        PullRequestReviewColumn::CreatedAt,
        PullRequestReviewColumn::PublishedAt,
        PullRequestReviewColumn::LastEditedAt,
        PullRequestReviewColumn::UpdatedAt,
        PullRequestReviewColumn::SubmittedAt,
    ])
    .to_owned()
}

fn file_conflict() -> OnConflict {
    OnConflict::columns([PullRequestFileColumn::Pullrequest, PullRequestFileColumn::Path])
        .update_columns([
            PullRequestFileColumn::Additions,
            PullRequestFileColumn::Deletions,
        ])
        .to_owned()
}

fn comment_conflict() -> OnConflict {
    OnConflict::column(PullRequestCommentColumn::Id)
        .update_columns([
            PullRequestCommentColumn::Pullrequest,
            PullRequestCommentColumn::Author,
            PullRequestCommentColumn::AuthorAssociation,
            PullRequestCommentColumn::Body,
            PullRequestCommentColumn::CreatedAt,
            PullRequestCommentColumn::PublishedAt,
            PullRequestCommentColumn::UpdatedAt,
            PullRequestCommentColumn::LastEditedAt,
        ])
        .to_owned()
}

fn comment_reaction_conflict() -> OnConflict {
    OnConflict::columns([
        PullRequestCommentReactionColumn::Pullrequest,
        PullRequestCommentReactionColumn::Comment,
        PullRequestCommentReactionColumn::Reaction,
    ])
    .update_column(PullRequestCommentReactionColumn::Count)
    .to_owned()
}

/// Write a pull request's rows on an open connection or transaction.
pub(crate) async fn write_pull_request<C: ConnectionTrait>(
    conn: &C,
    rows: PullRequestRows,
) -> Result<(), DbErr> {
    let PullRequestRows {
        pull_request,
        reactions,
        reviews,
        files,
        comments,
        comment_reactions,
    } = rows;

    upsert(conn, pull_request, &pull_request_conflict()).await?;
    upsert_all(conn, reactions, &reaction_conflict()).await?;
    upsert_all(conn, reviews, &review_conflict()).await?;
    upsert_all(conn, files, &file_conflict()).await?;
    upsert_all(conn, comments, &comment_conflict()).await?;
    upsert_all(conn, comment_reactions, &comment_reaction_conflict()).await?;
    Ok(())
}

#[async_trait]
impl Persist for PullRequest {
    async fn persist(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let txn = db.begin().await?;
        write_pull_request(&txn, self.to_rows()).await?;
        txn.commit().await?;
        tracing::debug!(id = %self.id, number = self.number, "Committed pull request");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::sea_query::{PostgresQueryBuilder, Query};

    use super::*;

    #[test]
    fn test_review_conflict_keys_on_pull_request_and_author() {
        let sql = Query::insert()
            .into_table(PullRequestReview)
            .columns([
                PullRequestReviewColumn::Pullrequest,
                PullRequestReviewColumn::Author,
                PullRequestReviewColumn::State,
            ])
            .values_panic(["PR_1".into(), "octocat".into(), "APPROVED".into()])
            .on_conflict(review_conflict())
            .to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"ON CONFLICT ("pullrequest", "author") DO UPDATE SET"#));
        assert!(sql.contains(r#""state" = "excluded"."state""#));
    }

    #[test]
    fn test_file_conflict_updates_only_line_counts() {
        let sql = Query::insert()
            .into_table(PullRequestFile)
            .columns([
                PullRequestFileColumn::Pullrequest,
                PullRequestFileColumn::Path,
                PullRequestFileColumn::Additions,
                PullRequestFileColumn::Deletions,
            ])
            .values_panic(["PR_1".into(), "a.rs".into(), 1.into(), 2.into()])
            .on_conflict(file_conflict())
            .to_string(PostgresQueryBuilder);

        assert!(sql.ends_with(
            r#"DO UPDATE SET "additions" = "excluded"."additions", "deletions" = "excluded"."deletions""#
        ));
    }
}
