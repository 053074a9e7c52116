use crate::theme::BASE_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "j, DOWN         Scroll down one week",
    "k, UP           Scroll up one week",
    "z, PAGE DOWN    Scroll down one page",
    "w, PAGE UP      Scroll up one page",
    "h, LEFT         Move to the previous day",
    "l, RIGHT        Move to the next day",
    "SPACE, ENTER    Select or unselect the day",
    "a               Toggle whether all days are selectable",
    "0, HOME         Jump to today",
    "?               Show this help",
    "q, ESC          Quit",
    "",
    "Press the Any Key to dismiss.",
];

/// Key reference popup, centered over the calendar
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help;

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter(TEXT.iter().map(|&s| Line::raw(s)));
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.width);
        let [popup] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [popup] = Layout::vertical([height]).flex(Flex::Center).areas(popup);
        Clear.render(popup, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(BASE_STYLE)
            .render(popup, buf);
    }
}
