// src/paginate/links.rs
// =============================================================================
// LinkSet: the URLs collected across all pages, without duplicates.
//
// The site repeats promoted listings on many pages, so the same URL can show
// up more than once. A HashSet alone would lose the order the listings were
// found in, so we keep a Vec for order and a HashSet for the membership test.
// =============================================================================

use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct LinkSet {
    order: Vec<String>,
    seen: HashSet<String>,
    offered: usize,
    duplicates: usize,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds a URL; returns false if it was already present
    pub fn insert(&mut self, url: String) -> bool {
        self.offered += 1;
        if self.seen.contains(&url) {
            self.duplicates += 1;
            return false;
        }
        self.seen.insert(url.clone());
        self.order.push(url);
        true
    }

    // Adds every URL and returns how many were new
    pub fn extend<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = 0;
        for url in urls {
            if self.insert(url) {
                added += 1;
            }
        }
        added
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    // Number of URLs ever offered, duplicates included
    pub fn offered(&self) -> usize {
        self.offered
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    // Keeps the first `len` URLs in discovery order
    pub fn truncate(&mut self, len: usize) {
        if len >= self.order.len() {
            return;
        }
        for url in self.order.drain(len..) {
            self.seen.remove(&url);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why clone the URL in insert()?
//    - The Vec and the HashSet each own a copy of the String
//    - Listing URLs are short, and there are at most a few thousand of them
//
// 2. What does drain(len..) do?
//    - Removes that range from the Vec and yields the removed items
//    - We use the yielded URLs to clean up the HashSet too
// -----------------------------------------------------------------------------
