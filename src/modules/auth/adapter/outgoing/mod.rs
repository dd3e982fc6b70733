pub mod jwt;
pub mod sea_orm_entity;
pub mod security;
pub mod user_query_postgres;
pub mod user_repository_postgres;
pub mod verification_token_redis;

pub use jwt::{JwtConfig, JwtTokenService};
pub use security::BcryptHasher;
pub use user_query_postgres::UserQueryPostgres;
pub use user_repository_postgres::UserRepositoryPostgres;
pub use verification_token_redis::RedisVerificationTokenRepository;
