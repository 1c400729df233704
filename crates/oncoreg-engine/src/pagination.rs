//! Page slicing for the patient table.

use serde::Serialize;

use crate::PatientRecord;

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// One page of the filtered subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a> {
    pub records: &'a [PatientRecord],
    /// 1-based page number after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_records: usize,
    pub page_size: usize,
}

impl Page<'_> {
    /// 1-based index of the first row on this page, or 0 when the page is empty.
    #[must_use]
    pub fn first_row(&self) -> usize {
        if self.records.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    #[must_use]
    pub fn last_row(&self) -> usize {
        if self.records.is_empty() {
            0
        } else {
            self.first_row() + self.records.len() - 1
        }
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages for `count` rows; at least one, even for no rows.
///
/// ```
/// # use oncoreg_engine::pagination::total_pages;
/// assert_eq!(total_pages(0, 100), 1);
/// assert_eq!(total_pages(100, 100), 1);
/// assert_eq!(total_pages(101, 100), 2);
/// ```
#[must_use]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Slices `records` into the requested page, clamping the page number into
/// `1..=total_pages`. A page size of 0 is treated as 1.
#[must_use]
pub fn paginate(records: &[PatientRecord], page_size: usize, requested_page: usize) -> Page<'_> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(records.len(), page_size);
    let page = requested_page.clamp(1, total_pages);
    let start = ((page - 1) * page_size).min(records.len());
    let end = (start + page_size).min(records.len());
    Page {
        records: &records[start..end],
        page,
        total_pages,
        total_records: records.len(),
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CancerType, Stage, VitalStatus};

    fn records(n: usize) -> Vec<PatientRecord> {
        (0..n)
            .map(|i| {
                PatientRecord::new(
                    format!("P{i}"),
                    CancerType::Colon,
                    Stage::StageII,
                    VitalStatus::Alive,
                    12.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_105_records_make_two_pages() {
        let records = records(105);
        let page = paginate(&records, DEFAULT_PAGE_SIZE, 1);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.records.len(), 100);
        assert_eq!(page.total_records, 105);

        let page = paginate(&records, DEFAULT_PAGE_SIZE, 2);
        assert_eq!(page.records.len(), 5);
        assert_eq!(page.first_row(), 101);
        assert_eq!(page.last_row(), 105);
        assert!(!page.has_next());
    }

    #[test]
    fn test_requested_page_is_clamped() {
        let records = records(105);
        assert_eq!(paginate(&records, 100, 5).page, 2);
        assert_eq!(paginate(&records, 100, 0).page, 1);
    }

    #[test]
    fn test_empty_subset_has_one_empty_page() {
        let page = paginate(&[], 100, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.records.is_empty());
        assert_eq!(page.first_row(), 0);
        assert!(!page.has_previous());
    }

    #[test]
    fn test_zero_page_size() {
        let records = records(3);
        let page = paginate(&records, 0, 2);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.records[0].id().as_str(), "P1");
    }
}
