use crate::database::{model::borrower::BorrowerRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    borrower::{
        event::{CreateBorrower, UpdateBorrower},
        Borrower,
    },
    id::BorrowerId,
};
use kernel::repository::borrower::BorrowerRepository;
use shared::error::{AppError, AppResult};

const BORROWER_COLUMNS: &str = "borrower_id, name, email, registered_date";

#[derive(new)]
pub struct BorrowerRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BorrowerRepository for BorrowerRepositoryImpl {
    async fn create(&self, event: CreateBorrower) -> AppResult<Borrower> {
        let borrower_id = BorrowerId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO borrowers
                (borrower_id, name, email, registered_date)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(borrower_id)
        .bind(&event.name)
        .bind(&event.email)
        .bind(event.registered_date)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No borrower record has been created".into(),
            ));
        }

        Ok(Borrower {
            id: borrower_id,
            name: event.name,
            email: event.email,
            registered_date: event.registered_date,
        })
    }

    async fn find_all(&self) -> AppResult<Vec<Borrower>> {
        let query = format!("SELECT {BORROWER_COLUMNS} FROM borrowers ORDER BY name ASC");
        sqlx::query_as::<_, BorrowerRow>(&query)
            .fetch_all(self.db.inner_ref())
            .await
            .map(|rows| rows.into_iter().map(Borrower::from).collect())
            .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, borrower_id: BorrowerId) -> AppResult<Option<Borrower>> {
        let query = format!("SELECT {BORROWER_COLUMNS} FROM borrowers WHERE borrower_id = $1");
        sqlx::query_as::<_, BorrowerRow>(&query)
            .bind(borrower_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map(|row| row.map(Borrower::from))
            .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Borrower>> {
        let query = format!("SELECT {BORROWER_COLUMNS} FROM borrowers WHERE email = $1");
        sqlx::query_as::<_, BorrowerRow>(&query)
            .bind(email)
            .fetch_optional(self.db.inner_ref())
            .await
            .map(|row| row.map(Borrower::from))
            .map_err(AppError::SpecificOperationError)
    }

    async fn update(&self, event: UpdateBorrower) -> AppResult<Borrower> {
        let mut tx = self.db.begin().await?;

        let query =
            format!("SELECT {BORROWER_COLUMNS} FROM borrowers WHERE borrower_id = $1 FOR UPDATE");
        let current: Option<BorrowerRow> = sqlx::query_as(&query)
            .bind(event.borrower_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        let Some(current) = current.map(Borrower::from) else {
            return Err(AppError::EntityNotFound(format!(
                "Borrower ({}) not found.",
                event.borrower_id
            )));
        };

        // registered_date is immutable; absent fields keep their stored values
        let borrower = Borrower {
            id: current.id,
            name: event.name.unwrap_or(current.name),
            email: event.email.unwrap_or(current.email),
            registered_date: current.registered_date,
        };

        let res = sqlx::query("UPDATE borrowers SET name = $2, email = $3 WHERE borrower_id = $1")
            .bind(borrower.id)
            .bind(&borrower.name)
            .bind(&borrower.email)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No borrower record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(borrower)
    }

    async fn delete(&self, borrower_id: BorrowerId) -> AppResult<Borrower> {
        let mut tx = self.db.begin().await?;

        let query = format!("SELECT {BORROWER_COLUMNS} FROM borrowers WHERE borrower_id = $1");
        let borrower: Option<BorrowerRow> = sqlx::query_as(&query)
            .bind(borrower_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        let Some(borrower) = borrower.map(Borrower::from) else {
            return Err(AppError::EntityNotFound(format!(
                "Borrower ({borrower_id}) not found."
            )));
        };

        let res = sqlx::query("DELETE FROM borrowers WHERE borrower_id = $1")
            .bind(borrower_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No borrower record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(borrower)
    }
}
