//! Grid widget: draws the gallery as boxed cells at the tracker's current
//! (possibly mid-animation) scroll offset.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{
        Block, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

use gallery_scroll::core::grid::UniformGrid;
use gallery_scroll::core::selection::Selection;
use gallery_scroll::core::viewport::ScrollContainer;

use super::theme::Theme;
use crate::app::gallery::{Gallery, GalleryItem};

pub struct GridWidget<'a> {
    gallery: &'a Gallery,
    grid: &'a UniformGrid,
    cell_width: u16,
    block: Option<Block<'a>>,
}

impl<'a> GridWidget<'a> {
    pub fn new(gallery: &'a Gallery, grid: &'a UniformGrid, cell_width: u16) -> Self {
        Self {
            gallery,
            grid,
            cell_width,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for GridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.is_empty() {
            return;
        }

        let selected = self.gallery.selected();
        let columns = self.grid.columns();
        let row_height = self.grid.row_height();
        // Terminal rows are whole; the animation's fractional offset rounds.
        let scroll = self.grid.scroll_top().round();

        self.gallery.with_items(|items| {
            for row in self.grid.visible_rows() {
                let top = f64::from(inner.y) + row as f64 * row_height - scroll;
                for column in 0..columns {
                    let index = row * columns + column;
                    let Some(item) = items.get(index) else {
                        break;
                    };
                    let x = inner.x + column as u16 * self.cell_width;
                    if x >= inner.right() {
                        break;
                    }
                    let cell = CellBox {
                        x,
                        top,
                        width: self.cell_width.min(inner.right() - x),
                        height: row_height as u16,
                        selected: selected == Some(index),
                    };
                    cell.draw(item, inner, buf);
                }
            }
        });

        let container = self.grid.grid_container();
        let max_scroll = container.bounds().max;
        if max_scroll > 0.0 {
            let mut scrollbar = ScrollbarState::new(max_scroll as usize + 1)
                .viewport_content_length(container.client_height() as usize)
                .position(scroll as usize);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .render(area, buf, &mut scrollbar);
        }
    }
}

/// One item's box; `top` may lie above or below the clip area.
struct CellBox {
    x: u16,
    top: f64,
    width: u16,
    height: u16,
    selected: bool,
}

impl CellBox {
    fn draw(&self, item: &GalleryItem, clip: Rect, buf: &mut Buffer) {
        // One column of gutter between neighbours.
        let inner_width = self.width.saturating_sub(3) as usize;
        if inner_width == 0 || self.height < 3 {
            return;
        }

        let (frame_style, text_style) = if self.selected {
            (Theme::selected_style(), Theme::selected_style())
        } else if item.is_dir {
            (Theme::cell_border_style(), Theme::dir_cell_style())
        } else {
            (Theme::cell_border_style(), Theme::cell_style())
        };

        let label = label_for(item, inner_width);
        let middle = self.height / 2;
        for line in 0..self.height {
            let y = self.top + f64::from(line);
            if y < f64::from(clip.y) || y >= f64::from(clip.bottom()) {
                continue;
            }
            let y = y as u16;
            let text = if line == 0 {
                format!("╭{}╮", "─".repeat(inner_width))
            } else if line == self.height - 1 {
                format!("╰{}╯", "─".repeat(inner_width))
            } else {
                format!("│{}│", " ".repeat(inner_width))
            };
            buf.set_string(self.x, y, text, frame_style);
            if line == middle {
                buf.set_string(self.x + 1, y, &label, text_style);
            }
        }
    }
}

fn label_for(item: &GalleryItem, width: usize) -> String {
    let name = if item.is_dir {
        format!("{}/", item.name)
    } else {
        item.name.clone()
    };
    let truncated: String = if name.chars().count() > width {
        let mut s: String = name.chars().take(width.saturating_sub(1)).collect();
        s.push('…');
        s
    } else {
        name
    };
    format!("{truncated:^width$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_scroll::core::geometry::Rect as ViewRect;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    fn setup(count: usize) -> (Gallery, UniformGrid) {
        let gallery = Gallery::synthetic(count);
        let grid = UniformGrid::new(2, 3.0);
        grid.set_item_count(count);
        grid.set_viewport(ViewRect::new(0.0, 6.0));
        (gallery, grid)
    }

    #[test]
    fn long_names_are_truncated() {
        let item = GalleryItem {
            name: "holiday-photos".into(),
            is_dir: true,
        };
        assert_eq!(label_for(&item, 8), "holiday…");
        let short = GalleryItem {
            name: "a".into(),
            is_dir: false,
        };
        assert_eq!(label_for(&short, 5), "  a  ");
    }

    #[test]
    fn renders_visible_rows_at_the_scroll_offset() {
        let (gallery, grid) = setup(8);
        let area = Rect::new(0, 0, 28, 6);
        let mut buf = Buffer::empty(area);
        GridWidget::new(&gallery, &grid, 14).render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("item    1"));
        assert!(row_text(&buf, 4).contains("item    3"));

        grid.grid_container().set_scroll_top(3.0);
        let mut buf = Buffer::empty(area);
        GridWidget::new(&gallery, &grid, 14).render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("item    3"));
        assert!(row_text(&buf, 4).contains("item    5"));
    }

    #[test]
    fn partially_scrolled_rows_are_clipped() {
        let (gallery, grid) = setup(8);
        grid.grid_container().set_scroll_top(1.0);
        let area = Rect::new(0, 0, 28, 6);
        let mut buf = Buffer::empty(area);
        GridWidget::new(&gallery, &grid, 14).render(area, &mut buf);
        // Row 0 lost its top border; its label is now on the first line.
        assert!(row_text(&buf, 0).contains("item    1"));
        assert!(row_text(&buf, 1).starts_with('╰'));
    }

    #[test]
    fn only_the_selected_cell_is_highlighted() {
        let (gallery, grid) = setup(4);
        let area = Rect::new(0, 0, 28, 6);
        let mut buf = Buffer::empty(area);
        GridWidget::new(&gallery, &grid, 14).render(area, &mut buf);
        let highlight = Theme::selected_style().bg;
        assert_eq!(Some(buf[(0, 0)].bg), highlight);
        assert_ne!(Some(buf[(14, 0)].bg), highlight);
    }
}
