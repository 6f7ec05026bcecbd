//! Memoizing wrapper around a rate provider
//!
//! Rate sets are deterministic per (gender, risk class, issue age), so a
//! cached set is indistinguishable from a freshly built one. Errors are not
//! cached; a failing key is retried on the next request.

use super::{RateError, RateProvider, RateSet};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

type RateKey = (String, String, u8);

/// Thread-safe cache of rate sets built by an inner provider
pub struct CachedRateProvider<P> {
    inner: P,
    cache: RwLock<HashMap<RateKey, Arc<RateSet>>>,
}

impl<P: RateProvider> CachedRateProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of distinct rate sets currently cached
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Shared handle to the cached rate set, building it on first access
    pub fn get_shared(&self, gender: &str, risk_class: &str, issue_age: u8) -> Result<Arc<RateSet>, RateError> {
        let key = (gender.to_string(), risk_class.to_string(), issue_age);

        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(rates) = cache.get(&key) {
                return Ok(Arc::clone(rates));
            }
        }

        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());

        // Another worker may have built it while we waited for the write lock
        if let Some(rates) = cache.get(&key) {
            return Ok(Arc::clone(rates));
        }

        log::debug!("Building rate set for {}/{}/{}", gender, risk_class, issue_age);
        let rates = Arc::new(self.inner.get_rates(gender, risk_class, issue_age)?);
        cache.insert(key, Arc::clone(&rates));
        Ok(rates)
    }
}

impl<P: RateProvider> RateProvider for CachedRateProvider<P> {
    fn get_rates(&self, gender: &str, risk_class: &str, issue_age: u8) -> Result<RateSet, RateError> {
        self.get_shared(gender, risk_class, issue_age).map(|rates| (*rates).clone())
    }
}
