use adapter::{
    database::ConnectionPool,
    repository::{
        book::BookRepositoryImpl, borrow::BorrowRepositoryImpl, borrower::BorrowerRepositoryImpl,
        health::HealthCheckRepositoryImpl,
    },
};
use kernel::repository::{
    book::BookRepository, borrow::BorrowRepository, borrower::BorrowerRepository,
    health::HealthCheckRepository,
};
use std::sync::Arc;

/// Wires concrete repositories to the connection pool. Handlers only ever see
/// the `AppRegistry` trait object, so tests can swap in mocks.
#[derive(Clone)]
pub struct AppRegistryImpl {
    book_repository: Arc<dyn BookRepository>,
    borrower_repository: Arc<dyn BorrowerRepository>,
    borrow_repository: Arc<dyn BorrowRepository>,
    health_check_repository: Arc<dyn HealthCheckRepository>,
}

impl AppRegistryImpl {
    pub fn new(pool: ConnectionPool) -> Self {
        let book_repository = Arc::new(BookRepositoryImpl::new(pool.clone()));
        let borrower_repository = Arc::new(BorrowerRepositoryImpl::new(pool.clone()));
        let borrow_repository = Arc::new(BorrowRepositoryImpl::new(pool.clone()));
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        Self {
            book_repository,
            borrower_repository,
            borrow_repository,
            health_check_repository,
        }
    }
}

#[mockall::automock]
pub trait AppRegistryExt {
    fn book_repository(&self) -> Arc<dyn BookRepository>;
    fn borrower_repository(&self) -> Arc<dyn BorrowerRepository>;
    fn borrow_repository(&self) -> Arc<dyn BorrowRepository>;
    fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository>;
}

impl AppRegistryExt for AppRegistryImpl {
    fn book_repository(&self) -> Arc<dyn BookRepository> {
        self.book_repository.clone()
    }

    fn borrower_repository(&self) -> Arc<dyn BorrowerRepository> {
        self.borrower_repository.clone()
    }

    fn borrow_repository(&self) -> Arc<dyn BorrowRepository> {
        self.borrow_repository.clone()
    }

    fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }
}

pub type AppRegistry = Arc<dyn AppRegistryExt + Send + Sync + 'static>;
