pub mod query;
pub mod sea_orm_repo;
pub mod sql;
pub mod value;

pub use sea_orm_repo::SeaOrmCommonDao;
