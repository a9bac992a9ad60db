use crate::event_query::PageWindow;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Clamped page coordinates. Out-of-range input is corrected, never
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page_number: Option<i64>, page_size: Option<i64>) -> Self {
        let page_number = match page_number {
            Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
            _ => 1,
        };
        let page_size = match page_size {
            Some(n) if n < 1 => DEFAULT_PAGE_SIZE,
            Some(n) if n > i64::from(MAX_PAGE_SIZE) => MAX_PAGE_SIZE,
            Some(n) => n as u32,
            None => DEFAULT_PAGE_SIZE,
        };

        Self {
            page_number,
            page_size,
        }
    }

    pub fn skip(&self) -> u64 {
        u64::from(self.page_number - 1) * u64::from(self.page_size)
    }

    pub fn take(&self) -> u64 { u64::from(self.page_size) }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            skip: self.skip(),
            take: self.take(),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self { Self::new(None, None) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let page = PageRequest::default();

        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(page.skip(), 0);
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(PageRequest::new(Some(0), Some(10)).page_number, 1);
        assert_eq!(PageRequest::new(Some(-4), Some(10)).page_number, 1);
        assert_eq!(PageRequest::new(Some(2), Some(0)).page_size, 10);
        assert_eq!(PageRequest::new(Some(2), Some(-1)).page_size, 10);
        assert_eq!(PageRequest::new(Some(2), Some(500)).page_size, 100);
        assert_eq!(PageRequest::new(Some(2), Some(100)).page_size, 100);
        assert_eq!(PageRequest::new(Some(2), Some(1)).page_size, 1);
    }

    #[test]
    fn window_skips_previous_pages() {
        let window = PageRequest::new(Some(3), Some(20)).window();

        assert_eq!(window, PageWindow { skip: 40, take: 20 });
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let page = PageRequest::new(Some(i64::MAX), Some(100));

        assert_eq!(page.page_number, u32::MAX);
        assert_eq!(page.skip(), u64::from(u32::MAX - 1) * 100);
    }
}
