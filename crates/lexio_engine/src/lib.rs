//! Database-backed engine for lexio.
//!
//! Every operation is synchronous and bounded: callers own sequencing,
//! retries and timeouts.

pub mod domain;
pub mod error;
pub mod queries;
pub mod schema;
pub mod utils;

use diesel::{
    prelude::*,
    r2d2::{ConnectionManager, Pool},
};
use error::EngineResult;
use lexio::profile::CompiledProfile;
use moka::sync::Cache;
use std::{fmt::Debug, ops::Deref, sync::Arc, time::Duration};

pub type LexioPool = Pool<ConnectionManager<PgConnection>>;

/// Compiled language profiles keyed by language code.
///
/// Compiling a profile builds a regex, so the result is reused across calls.
/// `domain::profiles::upsert` refreshes the entry for the updated language.
pub type ProfileCache = Cache<String, Arc<CompiledProfile>>;

#[derive(Clone)]
pub struct LexioState(Arc<LexioStateCore>);

impl Deref for LexioState {
    type Target = LexioStateCore;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Debug for LexioState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lexio")
    }
}

pub struct LexioStateCore {
    pub pool: LexioPool,
    pub profile_cache: ProfileCache,
}

pub fn state_from_vars(database_url: &str) -> EngineResult<LexioState> {
    // conservative pool config aimed at not using the database too much
    let pool = Pool::builder()
        .min_idle(Some(0))
        .idle_timeout(Some(Duration::from_secs(30)))
        .build(ConnectionManager::new(database_url))?;
    let profile_cache = Cache::builder().max_capacity(100).build();
    Ok(LexioState(Arc::new(LexioStateCore {
        pool,
        profile_cache,
    })))
}
