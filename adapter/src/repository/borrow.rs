use crate::database::{
    model::borrow::{BorrowRow, BorrowedBookRow, ReportRow},
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::model::{
    borrow::{
        event::{CreateBorrow, ReturnBorrow},
        Borrow, BorrowWindow, BorrowedBook, ReportEntry, ReportPeriod,
    },
    id::{BorrowId, BorrowerId},
};
use kernel::repository::borrow::BorrowRepository;
use shared::error::{AppError, AppResult};

const BORROWED_BOOK_COLUMNS: &str = r#"
    b.borrow_id,
    b.book_id,
    b.borrower_id,
    b.borrowed_at,
    b.due_date,
    b.returned_at,
    bk.title,
    bk.author,
    bk.isbn
"#;

#[derive(new)]
pub struct BorrowRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BorrowRepository for BorrowRepositoryImpl {
    async fn borrow_book(&self, event: CreateBorrow) -> AppResult<Borrow> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        // Preconditions, checked inside the transaction:
        // - the borrower exists
        // - the book exists and has loanable copies
        // - the borrower does not already hold an outstanding loan of it
        let borrower: Option<BorrowerId> =
            sqlx::query_scalar("SELECT borrower_id FROM borrowers WHERE borrower_id = $1")
                .bind(event.borrower_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if borrower.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "Borrower ({}) not found.",
                event.borrower_id
            )));
        }

        let quantity: Option<i32> =
            sqlx::query_scalar("SELECT quantity_available FROM books WHERE book_id = $1")
                .bind(event.book_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        match quantity {
            None => {
                return Err(AppError::EntityNotFound(format!(
                    "Book ({}) not found.",
                    event.book_id
                )))
            }
            Some(quantity) if quantity <= 0 => return Err(AppError::BookUnavailable),
            _ => {}
        }

        let outstanding: Option<BorrowId> = sqlx::query_scalar(
            r#"
                SELECT borrow_id FROM borrows
                WHERE book_id = $1 AND borrower_id = $2 AND returned_at IS NULL
            "#,
        )
        .bind(event.book_id)
        .bind(event.borrower_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if outstanding.is_some() {
            return Err(AppError::UnprocessableEntity(format!(
                "Borrower ({}) already has an outstanding loan of book ({}).",
                event.borrower_id, event.book_id
            )));
        }

        // Both writes commit or neither does.
        let res =
            sqlx::query("UPDATE books SET quantity_available = quantity_available - 1 WHERE book_id = $1")
                .bind(event.book_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No book stock has been updated".into(),
            ));
        }

        let borrow_id = BorrowId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO borrows
                (borrow_id, book_id, borrower_id, borrowed_at, due_date, returned_at)
                VALUES ($1, $2, $3, $4, $5, NULL)
            "#,
        )
        .bind(borrow_id)
        .bind(event.book_id)
        .bind(event.borrower_id)
        .bind(event.borrowed_at)
        .bind(event.due_date)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No borrow record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(Borrow {
            id: borrow_id,
            book_id: event.book_id,
            borrower_id: event.borrower_id,
            borrowed_at: event.borrowed_at,
            due_date: event.due_date,
            returned_at: None,
        })
    }

    async fn return_book(&self, event: ReturnBorrow) -> AppResult<Borrow> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        // The single-outstanding-loan invariant normally makes this a single
        // row; if the state is ever ambiguous, every outstanding record for
        // the pair is stamped and the earliest borrow is reported back.
        let outstanding: Vec<BorrowRow> = sqlx::query_as(
            r#"
                SELECT borrow_id, book_id, borrower_id, borrowed_at, due_date, returned_at
                FROM borrows
                WHERE book_id = $1 AND borrower_id = $2 AND returned_at IS NULL
                ORDER BY borrowed_at ASC
            "#,
        )
        .bind(event.book_id)
        .bind(event.borrower_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(representative) = outstanding.into_iter().next() else {
            return Err(AppError::EntityNotFound("Borrow record not found.".into()));
        };

        let res =
            sqlx::query("UPDATE books SET quantity_available = quantity_available + 1 WHERE book_id = $1")
                .bind(event.book_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No book stock has been updated".into(),
            ));
        }

        let res = sqlx::query(
            r#"
                UPDATE borrows SET returned_at = $3
                WHERE book_id = $1 AND borrower_id = $2 AND returned_at IS NULL
            "#,
        )
        .bind(event.book_id)
        .bind(event.borrower_id)
        .bind(event.returned_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No borrow record has been returned".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        let mut returned = Borrow::from(representative);
        returned.returned_at = Some(event.returned_at);
        Ok(returned)
    }

    async fn find_unreturned_all(&self) -> AppResult<Vec<BorrowedBook>> {
        let query = format!(
            r#"
                SELECT {BORROWED_BOOK_COLUMNS}
                FROM borrows AS b
                INNER JOIN books AS bk USING (book_id)
                WHERE b.returned_at IS NULL
                ORDER BY b.borrowed_at ASC
            "#
        );
        sqlx::query_as::<_, BorrowedBookRow>(&query)
            .fetch_all(self.db.inner_ref())
            .await
            .map(|rows| rows.into_iter().map(BorrowedBook::from).collect())
            .map_err(AppError::SpecificOperationError)
    }

    async fn find_unreturned_by_borrower(
        &self,
        borrower_id: BorrowerId,
    ) -> AppResult<Vec<BorrowedBook>> {
        let query = format!(
            r#"
                SELECT {BORROWED_BOOK_COLUMNS}
                FROM borrows AS b
                INNER JOIN books AS bk USING (book_id)
                WHERE b.borrower_id = $1 AND b.returned_at IS NULL
                ORDER BY b.borrowed_at ASC
            "#
        );
        sqlx::query_as::<_, BorrowedBookRow>(&query)
            .bind(borrower_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map(|rows| rows.into_iter().map(BorrowedBook::from).collect())
            .map_err(AppError::SpecificOperationError)
    }

    async fn find_borrowed_in(&self, window: BorrowWindow) -> AppResult<Vec<BorrowedBook>> {
        let query = format!(
            r#"
                SELECT {BORROWED_BOOK_COLUMNS}
                FROM borrows AS b
                INNER JOIN books AS bk USING (book_id)
                WHERE b.borrowed_at > $1 AND b.borrowed_at < $2
                ORDER BY b.borrowed_at ASC
            "#
        );
        sqlx::query_as::<_, BorrowedBookRow>(&query)
            .bind(window.after)
            .bind(window.before)
            .fetch_all(self.db.inner_ref())
            .await
            .map(|rows| rows.into_iter().map(BorrowedBook::from).collect())
            .map_err(AppError::SpecificOperationError)
    }

    async fn find_due(
        &self,
        as_of: DateTime<Utc>,
        borrower_id: Option<BorrowerId>,
    ) -> AppResult<Vec<BorrowedBook>> {
        let mut builder = sqlx::QueryBuilder::new(format!(
            r#"
                SELECT {BORROWED_BOOK_COLUMNS}
                FROM borrows AS b
                INNER JOIN books AS bk USING (book_id)
                WHERE b.returned_at IS NULL AND b.due_date <
            "#
        ));
        builder.push_bind(as_of);
        if let Some(borrower_id) = borrower_id {
            builder.push(" AND b.borrower_id = ");
            builder.push_bind(borrower_id);
        }
        builder.push(" ORDER BY b.borrowed_at ASC");

        builder
            .build_query_as::<BorrowedBookRow>()
            .fetch_all(self.db.inner_ref())
            .await
            .map(|rows| rows.into_iter().map(BorrowedBook::from).collect())
            .map_err(AppError::SpecificOperationError)
    }

    async fn find_due_in(&self, window: BorrowWindow) -> AppResult<Vec<BorrowedBook>> {
        let query = format!(
            r#"
                SELECT {BORROWED_BOOK_COLUMNS}
                FROM borrows AS b
                INNER JOIN books AS bk USING (book_id)
                WHERE b.returned_at IS NULL AND b.due_date > $1 AND b.due_date < $2
                ORDER BY b.borrowed_at ASC
            "#
        );
        sqlx::query_as::<_, BorrowedBookRow>(&query)
            .bind(window.after)
            .bind(window.before)
            .fetch_all(self.db.inner_ref())
            .await
            .map(|rows| rows.into_iter().map(BorrowedBook::from).collect())
            .map_err(AppError::SpecificOperationError)
    }

    async fn find_borrowed_between(&self, period: ReportPeriod) -> AppResult<Vec<ReportEntry>> {
        sqlx::query_as::<_, ReportRow>(
            r#"
                SELECT
                b.borrow_id,
                b.borrowed_at,
                b.due_date,
                b.returned_at,
                bk.title,
                bk.author,
                bk.isbn,
                br.name,
                br.email
                FROM borrows AS b
                INNER JOIN books AS bk USING (book_id)
                INNER JOIN borrowers AS br USING (borrower_id)
                WHERE b.borrowed_at >= $1 AND b.borrowed_at <= $2
                ORDER BY b.borrowed_at ASC
            "#,
        )
        .bind(period.start)
        .bind(period.end)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(ReportEntry::from).collect())
        .map_err(AppError::SpecificOperationError)
    }
}

impl BorrowRepositoryImpl {
    // The read-check-then-write sequences above race without this: two
    // concurrent borrows could both observe quantity_available = 1.
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}
