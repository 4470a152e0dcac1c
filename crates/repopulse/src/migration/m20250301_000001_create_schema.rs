//! Initial migration to create the activity schema.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_metadata(manager).await?;
        self.create_issues(manager).await?;
        self.create_pull_requests(manager).await?;
        self.create_releases(manager).await?;
        self.create_metrics(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children before parents.
        manager
            .drop_table(Table::drop().table(MetricsReferrers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MetricsPaths::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MetricsViews::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MetricsClones::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Metrics::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ReleaseAssets::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Releases::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PullRequestCommentReactions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PullRequestComments::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PullRequestFiles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PullRequestReviews::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PullRequestReactions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PullRequests::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IssueCommentReactions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IssueComments::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IssueReactions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Issues::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Metadata::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    async fn create_metadata(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Metadata::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Metadata::Owner).string().not_null())
                    .col(ColumnDef::new(Metadata::Repository).string().not_null())
                    .col(
                        ColumnDef::new(Metadata::IssuesUpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Metadata::PullrequestsUpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(Metadata::Owner)
                            .col(Metadata::Repository),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_issues(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Issues::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Issues::Id).string().not_null().primary_key())
                    // Identity
                    .col(ColumnDef::new(Issues::Owner).string().not_null())
                    .col(ColumnDef::new(Issues::Repository).string().not_null())
                    .col(ColumnDef::new(Issues::Number).big_integer().not_null())
                    // Content
                    .col(ColumnDef::new(Issues::Title).text().not_null())
                    .col(ColumnDef::new(Issues::Body).text().not_null())
                    .col(ColumnDef::new(Issues::Author).string().null())
                    .col(ColumnDef::new(Issues::AuthorAssociation).string().not_null())
                    .col(
                        ColumnDef::new(Issues::Labels)
                            .json()
                            .not_null()
                            .default(Expr::cust("'[]'")),
                    )
                    // Timestamps
                    .col(
                        ColumnDef::new(Issues::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Issues::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Issues::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Issues::LastEditedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Issues::ClosedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    // State
                    .col(ColumnDef::new(Issues::State).string().not_null())
                    .col(
                        ColumnDef::new(Issues::Locked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Issues::Closed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Issues::ClosedBy).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_github_issues_repo_updated")
                    .table(Issues::Table)
                    .col(Issues::Owner)
                    .col(Issues::Repository)
                    .col(Issues::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IssueReactions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(IssueReactions::Issue).string().not_null())
                    .col(ColumnDef::new(IssueReactions::Reaction).string().not_null())
                    .col(ColumnDef::new(IssueReactions::Count).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(IssueReactions::Issue)
                            .col(IssueReactions::Reaction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_github_issues_reactions_issue")
                            .from(IssueReactions::Table, IssueReactions::Issue)
                            .to(Issues::Table, Issues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IssueComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IssueComments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(IssueComments::Issue).string().not_null())
                    .col(ColumnDef::new(IssueComments::Author).string().null())
                    .col(
                        ColumnDef::new(IssueComments::AuthorAssociation)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(IssueComments::Body).text().not_null())
                    .col(
                        ColumnDef::new(IssueComments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IssueComments::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(IssueComments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IssueComments::LastEditedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_github_issues_comments_issue")
                            .from(IssueComments::Table, IssueComments::Issue)
                            .to(Issues::Table, Issues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_github_issues_comments_issue")
                    .table(IssueComments::Table)
                    .col(IssueComments::Issue)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IssueCommentReactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IssueCommentReactions::Issue)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IssueCommentReactions::Comment)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IssueCommentReactions::Reaction)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IssueCommentReactions::Count)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(IssueCommentReactions::Issue)
                            .col(IssueCommentReactions::Comment)
                            .col(IssueCommentReactions::Reaction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_github_issues_comments_reactions_comment")
                            .from(IssueCommentReactions::Table, IssueCommentReactions::Comment)
                            .to(IssueComments::Table, IssueComments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_pull_requests(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PullRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PullRequests::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    // Identity
                    .col(ColumnDef::new(PullRequests::Owner).string().not_null())
                    .col(ColumnDef::new(PullRequests::Repository).string().not_null())
                    .col(ColumnDef::new(PullRequests::Number).big_integer().not_null())
                    // Content
                    .col(ColumnDef::new(PullRequests::Title).text().not_null())
                    .col(ColumnDef::new(PullRequests::Body).text().not_null())
                    .col(ColumnDef::new(PullRequests::Author).string().null())
                    .col(
                        ColumnDef::new(PullRequests::AuthorAssociation)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequests::Labels)
                            .json()
                            .not_null()
                            .default(Expr::cust("'[]'")),
                    )
                    // Timestamps
                    .col(
                        ColumnDef::new(PullRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequests::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PullRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequests::LastEditedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PullRequests::ClosedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PullRequests::MergedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    // State
                    .col(ColumnDef::new(PullRequests::State).string().not_null())
                    .col(
                        ColumnDef::new(PullRequests::Locked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PullRequests::Closed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(PullRequests::ClosedBy).string().null())
                    .col(
                        ColumnDef::new(PullRequests::Merged)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(PullRequests::MergedBy).string().null())
                    .col(ColumnDef::new(PullRequests::Mergeable).string().not_null())
                    .col(ColumnDef::new(PullRequests::ReviewDecision).string().null())
                    // Diff
                    .col(
                        ColumnDef::new(PullRequests::Additions)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PullRequests::Deletions)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PullRequests::ChangedFiles)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(PullRequests::BaseRefName).string().not_null())
                    .col(ColumnDef::new(PullRequests::HeadRefName).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_github_pullrequests_repo_updated")
                    .table(PullRequests::Table)
                    .col(PullRequests::Owner)
                    .col(PullRequests::Repository)
                    .col(PullRequests::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PullRequestReactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PullRequestReactions::Pullrequest)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestReactions::Reaction)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestReactions::Count)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PullRequestReactions::Pullrequest)
                            .col(PullRequestReactions::Reaction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_github_pullrequests_reactions_pullrequest")
                            .from(PullRequestReactions::Table, PullRequestReactions::Pullrequest)
                            .to(PullRequests::Table, PullRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PullRequestReviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PullRequestReviews::Pullrequest)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PullRequestReviews::Author).string().not_null())
                    .col(
                        ColumnDef::new(PullRequestReviews::AuthorAssociation)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PullRequestReviews::Body).text().not_null())
                    .col(ColumnDef::new(PullRequestReviews::State).string().not_null())
                    .col(
                        ColumnDef::new(PullRequestReviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestReviews::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestReviews::LastEditedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestReviews::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestReviews::SubmittedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PullRequestReviews::Pullrequest)
                            .col(PullRequestReviews::Author),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_github_pullrequests_reviews_pullrequest")
                            .from(PullRequestReviews::Table, PullRequestReviews::Pullrequest)
                            .to(PullRequests::Table, PullRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PullRequestFiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PullRequestFiles::Pullrequest)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PullRequestFiles::Path).text().not_null())
                    .col(
                        ColumnDef::new(PullRequestFiles::Additions)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestFiles::Deletions)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PullRequestFiles::Pullrequest)
                            .col(PullRequestFiles::Path),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_github_pullrequests_files_pullrequest")
                            .from(PullRequestFiles::Table, PullRequestFiles::Pullrequest)
                            .to(PullRequests::Table, PullRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PullRequestComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PullRequestComments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PullRequestComments::Pullrequest)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PullRequestComments::Author).string().null())
                    .col(
                        ColumnDef::new(PullRequestComments::AuthorAssociation)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PullRequestComments::Body).text().not_null())
                    .col(
                        ColumnDef::new(PullRequestComments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestComments::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestComments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestComments::LastEditedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_github_pullrequests_comments_pullrequest")
                            .from(PullRequestComments::Table, PullRequestComments::Pullrequest)
                            .to(PullRequests::Table, PullRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_github_pullrequests_comments_pullrequest")
                    .table(PullRequestComments::Table)
                    .col(PullRequestComments::Pullrequest)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PullRequestCommentReactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PullRequestCommentReactions::Pullrequest)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestCommentReactions::Comment)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestCommentReactions::Reaction)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestCommentReactions::Count)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PullRequestCommentReactions::Pullrequest)
                            .col(PullRequestCommentReactions::Comment)
                            .col(PullRequestCommentReactions::Reaction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_github_pullrequests_comments_reactions_comment")
                            .from(
                                PullRequestCommentReactions::Table,
                                PullRequestCommentReactions::Comment,
                            )
                            .to(PullRequestComments::Table, PullRequestComments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_releases(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Releases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Releases::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Releases::Owner).string().not_null())
                    .col(ColumnDef::new(Releases::Repository).string().not_null())
                    .col(ColumnDef::new(Releases::Name).string().null())
                    .col(ColumnDef::new(Releases::Description).text().null())
                    .col(ColumnDef::new(Releases::Url).text().not_null())
                    .col(
                        ColumnDef::new(Releases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Releases::IsPrerelease)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Releases::Tag).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReleaseAssets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReleaseAssets::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReleaseAssets::Release).string().not_null())
                    .col(ColumnDef::new(ReleaseAssets::Owner).string().not_null())
                    .col(ColumnDef::new(ReleaseAssets::Repository).string().not_null())
                    .col(ColumnDef::new(ReleaseAssets::Name).string().not_null())
                    .col(
                        ColumnDef::new(ReleaseAssets::Downloads)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ReleaseAssets::Size)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_github_releases_assets_release")
                            .from(ReleaseAssets::Table, ReleaseAssets::Release)
                            .to(Releases::Table, Releases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_metrics(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Metrics::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Metrics::Owner).string().not_null())
                    .col(ColumnDef::new(Metrics::Repository).string().not_null())
                    .col(
                        ColumnDef::new(Metrics::Forks)
                            .json()
                            .not_null()
                            .default(Expr::cust("'[]'")),
                    )
                    .col(
                        ColumnDef::new(Metrics::Watches)
                            .json()
                            .not_null()
                            .default(Expr::cust("'[]'")),
                    )
                    .col(
                        ColumnDef::new(Metrics::Stars)
                            .json()
                            .not_null()
                            .default(Expr::cust("'[]'")),
                    )
                    .primary_key(
                        Index::create()
                            .col(Metrics::Owner)
                            .col(Metrics::Repository),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MetricsClones::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MetricsClones::Owner).string().not_null())
                    .col(ColumnDef::new(MetricsClones::Repository).string().not_null())
                    .col(ColumnDef::new(MetricsClones::Count).big_integer().not_null())
                    .col(ColumnDef::new(MetricsClones::Uniques).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(MetricsClones::Owner)
                            .col(MetricsClones::Repository),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_github_metrics_clones_metrics")
                            .from(
                                MetricsClones::Table,
                                (MetricsClones::Owner, MetricsClones::Repository),
                            )
                            .to(Metrics::Table, (Metrics::Owner, Metrics::Repository))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MetricsViews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MetricsViews::Owner).string().not_null())
                    .col(ColumnDef::new(MetricsViews::Repository).string().not_null())
                    .col(ColumnDef::new(MetricsViews::Count).big_integer().not_null())
                    .col(ColumnDef::new(MetricsViews::Uniques).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(MetricsViews::Owner)
                            .col(MetricsViews::Repository),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_github_metrics_views_metrics")
                            .from(
                                MetricsViews::Table,
                                (MetricsViews::Owner, MetricsViews::Repository),
                            )
                            .to(Metrics::Table, (Metrics::Owner, Metrics::Repository))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MetricsPaths::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MetricsPaths::Owner).string().not_null())
                    .col(ColumnDef::new(MetricsPaths::Repository).string().not_null())
                    .col(ColumnDef::new(MetricsPaths::Path).text().not_null())
                    .col(ColumnDef::new(MetricsPaths::Title).text().not_null())
                    .col(ColumnDef::new(MetricsPaths::Count).big_integer().not_null())
                    .col(ColumnDef::new(MetricsPaths::Uniques).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(MetricsPaths::Owner)
                            .col(MetricsPaths::Repository)
                            .col(MetricsPaths::Path),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_github_metrics_paths_metrics")
                            .from(
                                MetricsPaths::Table,
                                (MetricsPaths::Owner, MetricsPaths::Repository),
                            )
                            .to(Metrics::Table, (Metrics::Owner, Metrics::Repository))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MetricsReferrers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MetricsReferrers::Owner).string().not_null())
                    .col(
                        ColumnDef::new(MetricsReferrers::Repository)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MetricsReferrers::Referrer).string().not_null())
                    .col(
                        ColumnDef::new(MetricsReferrers::Count)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MetricsReferrers::Uniques)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(MetricsReferrers::Owner)
                            .col(MetricsReferrers::Repository)
                            .col(MetricsReferrers::Referrer),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_github_metrics_referrers_metrics")
                            .from(
                                MetricsReferrers::Table,
                                (MetricsReferrers::Owner, MetricsReferrers::Repository),
                            )
                            .to(Metrics::Table, (Metrics::Owner, Metrics::Repository))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

// ─── Identifiers ─────────────────────────────────────────────────────────────

#[derive(DeriveIden)]
enum Metadata {
    #[sea_orm(iden = "github_metadata")]
    Table,
    Owner,
    Repository,
    IssuesUpdatedAt,
    PullrequestsUpdatedAt,
}

#[derive(DeriveIden)]
enum Issues {
    #[sea_orm(iden = "github_issues")]
    Table,
    Id,
    Owner,
    Repository,
    Number,
    Title,
    Body,
    Author,
    AuthorAssociation,
    Labels,
    CreatedAt,
    PublishedAt,
    UpdatedAt,
    LastEditedAt,
    ClosedAt,
    State,
    Locked,
    Closed,
    ClosedBy,
}

#[derive(DeriveIden)]
enum IssueReactions {
    #[sea_orm(iden = "github_issues_reactions")]
    Table,
    Issue,
    Reaction,
    Count,
}

#[derive(DeriveIden)]
enum IssueComments {
    #[sea_orm(iden = "github_issues_comments")]
    Table,
    Id,
    Issue,
    Author,
    AuthorAssociation,
    Body,
    CreatedAt,
    PublishedAt,
    UpdatedAt,
    LastEditedAt,
}

#[derive(DeriveIden)]
enum IssueCommentReactions {
    #[sea_orm(iden = "github_issues_comments_reactions")]
    Table,
    Issue,
    Comment,
    Reaction,
    Count,
}

#[derive(DeriveIden)]
enum PullRequests {
    #[sea_orm(iden = "github_pullrequests")]
    Table,
    Id,
    Owner,
    Repository,
    Number,
    Title,
    Body,
    Author,
    AuthorAssociation,
    Labels,
    CreatedAt,
    PublishedAt,
    UpdatedAt,
    LastEditedAt,
    ClosedAt,
    MergedAt,
    State,
    Locked,
    Closed,
    ClosedBy,
    Merged,
    MergedBy,
    Mergeable,
    ReviewDecision,
    Additions,
    Deletions,
    ChangedFiles,
    BaseRefName,
    HeadRefName,
}

#[derive(DeriveIden)]
enum PullRequestReactions {
    #[sea_orm(iden = "github_pullrequests_reactions")]
    Table,
    Pullrequest,
    Reaction,
    Count,
}

#[derive(DeriveIden)]
enum PullRequestReviews {
    #[sea_orm(iden = "github_pullrequests_reviews")]
    Table,
    Pullrequest,
    Author,
    AuthorAssociation,
    Body,
    State,
    CreatedAt,
    PublishedAt,
    LastEditedAt,
    UpdatedAt,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum PullRequestFiles {
    #[sea_orm(iden = "github_pullrequests_files")]
    Table,
    Pullrequest,
    Path,
    Additions,
    Deletions,
}

#[derive(DeriveIden)]
enum PullRequestComments {
    #[sea_orm(iden = "github_pullrequests_comments")]
    Table,
    Id,
    Pullrequest,
    Author,
    AuthorAssociation,
    Body,
    CreatedAt,
    PublishedAt,
    UpdatedAt,
    LastEditedAt,
}

#[derive(DeriveIden)]
enum PullRequestCommentReactions {
    #[sea_orm(iden = "github_pullrequests_comments_reactions")]
    Table,
    Pullrequest,
    Comment,
    Reaction,
    Count,
}

#[derive(DeriveIden)]
enum Releases {
    #[sea_orm(iden = "github_releases")]
    Table,
    Id,
    Owner,
    Repository,
    Name,
    Description,
    Url,
    CreatedAt,
    IsPrerelease,
    Tag,
}

#[derive(DeriveIden)]
enum ReleaseAssets {
    #[sea_orm(iden = "github_releases_assets")]
    Table,
    Id,
    Release,
    Owner,
    Repository,
    Name,
    Downloads,
    Size,
}

#[derive(DeriveIden)]
enum Metrics {
    #[sea_orm(iden = "github_metrics")]
    Table,
    Owner,
    Repository,
    Forks,
    Watches,
    Stars,
}

#[derive(DeriveIden)]
enum MetricsClones {
    #[sea_orm(iden = "github_metrics_clones")]
    Table,
    Owner,
    Repository,
    Count,
    Uniques,
}

#[derive(DeriveIden)]
enum MetricsViews {
    #[sea_orm(iden = "github_metrics_views")]
    Table,
    Owner,
    Repository,
    Count,
    Uniques,
}

#[derive(DeriveIden)]
enum MetricsPaths {
    #[sea_orm(iden = "github_metrics_paths")]
    Table,
    Owner,
    Repository,
    Path,
    Title,
    Count,
    Uniques,
}

#[derive(DeriveIden)]
enum MetricsReferrers {
    #[sea_orm(iden = "github_metrics_referrers")]
    Table,
    Owner,
    Repository,
    Referrer,
    Count,
    Uniques,
}
