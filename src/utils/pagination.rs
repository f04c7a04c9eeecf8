use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Deserialize, Default)]
pub struct PaginationParams {
    /// Raw `?page=` value, anything but a number falls back to the first page
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PageObj<T> {
    pub object_list: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<usize>,
    pub next_page_number: Option<usize>,
}

/// Cuts `items` into pages of `per_page` and returns the one asked for.
///
/// Page numbers start at 1 and are clamped to the existing pages. An empty
/// sequence still has one (empty) page.
pub fn get_paginator<T>(params: &PaginationParams, items: Vec<T>, per_page: usize) -> PageObj<T> {
    let per_page = per_page.max(1);
    let count = items.len();
    let num_pages = count.div_ceil(per_page).max(1);

    let requested = params
        .page
        .as_deref()
        .and_then(|page| page.trim().parse::<i64>().ok())
        .unwrap_or(1);
    let number = requested.clamp(1, num_pages as i64) as usize;

    let object_list = items
        .into_iter()
        .skip((number - 1) * per_page)
        .take(per_page)
        .collect();

    PageObj {
        object_list,
        number,
        num_pages,
        count,
        has_previous: number > 1,
        has_next: number < num_pages,
        previous_page_number: (number > 1).then(|| number - 1),
        next_page_number: (number < num_pages).then(|| number + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(value: &str) -> PaginationParams {
        PaginationParams {
            page: Some(value.to_string()),
        }
    }

    #[test]
    fn pages_hold_consecutive_slices() {
        let items: Vec<usize> = (0..25).collect();

        let first = get_paginator(&page("1"), items.clone(), 10);
        assert_eq!(first.object_list, (0..10).collect::<Vec<_>>());
        assert_eq!(first.num_pages, 3);
        assert_eq!(first.count, 25);
        assert!(!first.has_previous);
        assert_eq!(first.next_page_number, Some(2));

        let second = get_paginator(&page("2"), items.clone(), 10);
        assert_eq!(second.object_list, (10..20).collect::<Vec<_>>());

        let last = get_paginator(&page("3"), items, 10);
        assert_eq!(last.object_list, (20..25).collect::<Vec<_>>());
        assert!(!last.has_next);
        assert_eq!(last.previous_page_number, Some(2));
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let items: Vec<usize> = (0..25).collect();

        let beyond = get_paginator(&page("99"), items.clone(), 10);
        assert_eq!(beyond.number, 3);
        assert_eq!(beyond.object_list, (20..25).collect::<Vec<_>>());

        let below = get_paginator(&page("0"), items.clone(), 10);
        assert_eq!(below.number, 1);

        let negative = get_paginator(&page("-4"), items, 10);
        assert_eq!(negative.number, 1);
    }

    #[test]
    fn missing_or_garbage_page_is_the_first() {
        let items: Vec<usize> = (0..15).collect();
        assert_eq!(get_paginator(&PaginationParams::default(), items.clone(), 10).number, 1);
        assert_eq!(get_paginator(&page("two"), items.clone(), 10).number, 1);
        assert_eq!(get_paginator(&page("1.5"), items, 10).number, 1);
    }

    #[test]
    fn empty_sequence_has_one_empty_page() {
        let empty = get_paginator(&page("4"), Vec::<u8>::new(), DEFAULT_PAGE_SIZE);
        assert_eq!(empty.number, 1);
        assert_eq!(empty.num_pages, 1);
        assert!(empty.object_list.is_empty());
        assert!(!empty.has_next);
    }
}
