//! Pagination shapes shared by services and persistence collaborators.

use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// Default page size when the caller does not pass one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Upper bound on a single page.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page index (0-based).
    pub page: u32,
    /// Number of items per page.
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a page request, rejecting an empty page size.
    pub fn new(page: u32, size: u32) -> ServiceResult<Self> {
        Self::with_max(page, size, MAX_PAGE_SIZE)
    }

    /// Same as [`PageRequest::new`], with a caller-chosen cap on `size`.
    pub fn with_max(page: u32, size: u32, max_size: u32) -> ServiceResult<Self> {
        if size == 0 {
            return Err(ServiceError::validation("page size must be at least 1"));
        }
        Ok(Self {
            page,
            size: size.min(max_size.max(1)),
        })
    }

    /// Index of the first element of this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Slice an already-ordered result set into the requested page.
    pub fn slice<T>(&self, all: Vec<T>) -> Page<T> {
        let total_elements = all.len() as u64;
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let content = all
            .into_iter()
            .skip(offset)
            .take(self.size as usize)
            .collect();
        Page::new(content, *self, total_elements)
    }
}

/// A bounded slice of a larger ordered result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages: total_elements.div_ceil(u64::from(request.size.max(1))),
        }
    }

    /// Map the page content, keeping the totals; the first error aborts the whole page.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let content = self.content.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Page {
            content,
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_page_size_is_rejected() {
        let err = PageRequest::new(0, 0).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn page_size_is_capped() {
        let req = PageRequest::new(0, 5000).unwrap();
        assert_eq!(req.size, MAX_PAGE_SIZE);
    }

    #[test]
    fn page_past_the_end_is_empty_but_keeps_totals() {
        let page = PageRequest::new(3, 2).unwrap().slice(vec![1, 2, 3]);
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn empty_result_set_has_zero_pages() {
        let page = PageRequest::default().slice(Vec::<u8>::new());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_elements, 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: sweeping every page visits each element exactly once, in order.
        #[test]
        fn full_sweep_visits_every_element_once(n in 0usize..200, size in 1u32..40) {
            let all: Vec<usize> = (0..n).collect();
            let first = PageRequest::new(0, size).unwrap().slice(all.clone());
            let expected_pages = (n as u64).div_ceil(u64::from(size));
            prop_assert_eq!(first.total_pages, expected_pages);
            prop_assert_eq!(first.total_elements, n as u64);

            let mut seen = Vec::new();
            for page in 0..first.total_pages {
                let p = PageRequest::new(page as u32, size).unwrap().slice(all.clone());
                prop_assert!(p.content.len() <= size as usize);
                seen.extend(p.content);
            }
            prop_assert_eq!(seen, all);
        }
    }
}
