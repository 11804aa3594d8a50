pub mod movie_service;
pub use movie_service::{MovieError, MovieService};

pub mod movie_service_impl;
pub use movie_service_impl::DefaultMovieService;

pub mod movie_store;
pub use movie_store::{MovieStore, StoreError};

pub mod movie_store_impl;
pub use movie_store_impl::{SeaOrmMovieStore, SnapshotMovieStore};

pub mod reconcile;
pub use reconcile::{MovieSource, ReconcileEngine, ReconcileStats};
