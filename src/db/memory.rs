// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store.
//!
//! Mirrors the subset of Firestore semantics the service relies on
//! (get, overwrite, create-if-absent, field-masked merge, equality query
//! with descending order and limit). Documents are kept as JSON values so
//! they round-trip through the same serde representation as Firestore.

use crate::error::AppError;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Collections of JSON documents keyed by document ID.
#[derive(Default)]
pub struct MemoryStore {
    collections: DashMap<String, BTreeMap<String, Value>>,
}

fn encode<T: Serialize>(obj: &T) -> Result<Value, AppError> {
    serde_json::to_value(obj).map_err(|e| AppError::Database(format!("encode failed: {}", e)))
}

fn matches_filter(doc: &Value, filter: Option<(&str, &str)>) -> bool {
    match filter {
        Some((field, expected)) => doc.get(field).and_then(Value::as_str) == Some(expected),
        None => true,
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::Database(format!("decode failed: {}", e)))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError> {
        self.collections
            .get(collection)
            .and_then(|docs| docs.get(id).cloned())
            .map(decode)
            .transpose()
    }

    /// Overwrite (or create) a document.
    pub fn set<T: Serialize>(&self, collection: &str, id: &str, obj: &T) -> Result<(), AppError> {
        let value = encode(obj)?;
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), value);
        Ok(())
    }

    /// Create a document only if the ID is free. Returns `false` on conflict.
    pub fn create<T: Serialize>(&self, collection: &str, id: &str, obj: &T) -> Result<bool, AppError> {
        let value = encode(obj)?;
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        if docs.contains_key(id) {
            return Ok(false);
        }
        docs.insert(id.to_string(), value);
        Ok(true)
    }

    /// Write only `fields` of `obj`, creating the document if needed.
    pub fn merge<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        obj: &T,
        fields: &[&str],
    ) -> Result<(), AppError> {
        let Value::Object(incoming) = encode(obj)? else {
            return Err(AppError::Internal(anyhow::anyhow!(
                "merge into {}/{} requires an object document",
                collection,
                id
            )));
        };

        let mut docs = self.collections.entry(collection.to_string()).or_default();
        let doc = docs
            .entry(id.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        if let Value::Object(existing) = doc {
            for field in fields {
                let value = incoming.get(*field).cloned().unwrap_or(Value::Null);
                existing.insert((*field).to_string(), value);
            }
        }
        Ok(())
    }

    /// Delete a document. Missing documents are not an error.
    pub fn delete(&self, collection: &str, id: &str) {
        if let Some(mut docs) = self.collections.get_mut(collection) {
            docs.remove(id);
        }
    }

    /// Equality-filtered query, optionally sorted descending on a string field.
    pub fn query<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: Option<(&str, &str)>,
        order_desc: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<T>, AppError> {
        let mut matched: Vec<Value> = match self.collections.get(collection) {
            Some(docs) => docs
                .values()
                .filter(|doc| matches_filter(doc, filter))
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        if let Some(field) = order_desc {
            // Timestamps are fixed-width RFC3339, so string order is time order.
            matched.sort_by(|a, b| {
                let a = a.get(field).and_then(Value::as_str).unwrap_or("");
                let b = b.get(field).and_then(Value::as_str).unwrap_or("");
                b.cmp(a)
            });
        }

        if let Some(limit) = limit {
            matched.truncate(limit as usize);
        }

        matched.into_iter().map(decode).collect()
    }

    /// Number of documents, optionally restricted by an equality filter.
    pub fn count(&self, collection: &str, filter: Option<(&str, &str)>) -> usize {
        self.collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| matches_filter(doc, filter))
                    .count()
            })
            .unwrap_or(0)
    }
}
