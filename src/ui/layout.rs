use tui::layout::{Constraint, Layout, Rect, Size};

pub const HEADER_HEIGHT: u16 = 3;
pub const TICKER_HEIGHT: u16 = 1;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub header: Rect,
    pub main: Rect,
    pub ticker: Rect,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        Self::from_rect(Rect::new(0, 0, size.width, size.height))
    }

    pub fn update(&mut self, area: Rect) {
        *self = Self::from_rect(area);
    }

    fn from_rect(area: Rect) -> Self {
        let [header, main, ticker] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(TICKER_HEIGHT),
        ])
        .areas(area);

        LayoutAreas { header, main, ticker }
    }
}
