use serde::Serialize;

/// One page of a filtered result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// "Showing 9 of 12 vehicles. (Page 1 of 2)"
    pub fn summary(&self) -> String {
        let mut summary = format!("Showing {} of {} vehicles.", self.items.len(), self.total_count);
        if self.total_pages > 1 {
            summary.push_str(&format!(" (Page {} of {})", self.page, self.total_pages));
        }
        summary
    }

    pub fn links(&self) -> Vec<PageLink> {
        page_links(self.page, self.total_pages)
    }
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamps `page` into `[1, total_pages]`. With no pages the result is 1.
pub fn clamp_page(page: i64, total_pages: usize) -> usize {
    let last = i64::try_from(total_pages).unwrap_or(i64::MAX).max(1);
    page.clamp(1, last) as usize
}

/// Slices `filtered` to the requested page, clamping out-of-range page numbers.
pub fn paginate<T: Clone>(filtered: &[T], page: i64, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(filtered.len(), page_size);
    let page = clamp_page(page, total_pages);

    let start = (page - 1) * page_size;
    let items = filtered
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    Page {
        items,
        page,
        page_size,
        total_pages,
        total_count: filtered.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PageLink {
    Page { number: usize, current: bool },
    Gap,
}

/// Page numbers for the pager: all of them up to five pages, otherwise the
/// first, the last and the neighbours of `current`, with gaps in between.
pub fn page_links(current: usize, total_pages: usize) -> Vec<PageLink> {
    let shown = (1..=total_pages).filter(|&number| {
        total_pages <= 5 || number == 1 || number == total_pages || number.abs_diff(current) < 2
    });

    let mut links = Vec::new();
    let mut previous = None;
    for number in shown {
        if previous.is_some_and(|prev| number > prev + 1) {
            links.push(PageLink::Gap);
        }
        links.push(PageLink::Page {
            number,
            current: number == current,
        });
        previous = Some(number);
    }
    links
}
