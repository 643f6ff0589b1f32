use crate::error::ScrapeError;

pub const BASE_URL: &str = "https://cdllife.com/trucking/companies";
pub const PAGE_COUNT: usize = 10;
pub const RESULTS_PER_PAGE: usize = 21;

/// Rows of the listing grid start at this child index in the page markup.
pub const FIRST_ROW: usize = 2;
pub const ROW_WIDTHS: [usize; 6] = [3, 3, 3, 4, 4, 4];

pub const NAME_PATH: &str =
    r#"//*[@id="sapper"]/main/div/div[2]/div[{row}]/div[{col}]/a/div/div/div[2]/h2"#;

/// Shape of the company grid on one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub first_row: usize,
    pub row_widths: Vec<usize>,
}

impl GridLayout {
    pub fn new(first_row: usize, row_widths: Vec<usize>) -> Self {
        Self {
            first_row,
            row_widths,
        }
    }

    /// Row-major `(row, col)` pairs, rows offset by `first_row`, columns 1-based.
    pub fn cells(&self) -> Vec<(usize, usize)> {
        self.row_widths
            .iter()
            .enumerate()
            .flat_map(|(i, &width)| {
                let row = self.first_row + i;
                (1..=width).map(move |col| (row, col))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.row_widths.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(FIRST_ROW, ROW_WIDTHS.to_vec())
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub page_count: usize,
    pub results_per_page: usize,
    pub name_path: String,
    pub layout: GridLayout,
}

impl ScrapeConfig {
    /// Rejects counts that disagree with the grid or cannot be multiplied out.
    pub fn validate(&self) -> Result<(), ScrapeError> {
        let cells = self.layout.len();
        if cells == 0 {
            return Err(ScrapeError::EmptyLayout);
        }
        if self.results_per_page != cells {
            return Err(ScrapeError::LayoutMismatch {
                per_page: self.results_per_page,
                cells,
            });
        }
        self.expected_total().map(|_| ())
    }

    pub fn expected_total(&self) -> Result<usize, ScrapeError> {
        self.page_count
            .checked_mul(self.results_per_page)
            .ok_or(ScrapeError::Overflow {
                page_count: self.page_count,
                per_page: self.results_per_page,
            })
    }

    pub fn offset(&self, page_index: usize) -> Result<usize, ScrapeError> {
        page_index
            .checked_mul(self.results_per_page)
            .ok_or(ScrapeError::Overflow {
                page_count: page_index,
                per_page: self.results_per_page,
            })
    }

    pub fn page_url(&self, offset: usize) -> String {
        format!("{}?skip={}", self.base_url, offset)
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_owned(),
            page_count: PAGE_COUNT,
            results_per_page: RESULTS_PER_PAGE,
            name_path: NAME_PATH.to_owned(),
            layout: GridLayout::default(),
        }
    }
}
