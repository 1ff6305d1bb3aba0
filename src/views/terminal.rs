//! Terminal rendering
//!
//! Table renderings of the storefront pages for a terminal.

use std::{fmt::Write as _, io};

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::{
    summary::{OrderSummary, SummaryDisplay},
    views::{
        cart::{CartSurface, LineView},
        checkout::{CheckoutView, EMPTY_CART_MESSAGE},
        detail::DetailView,
        listing::{Pagination, ProductCard, ReviewEntry},
        selection::SelectAllState,
    },
};

/// Shown instead of the cart table when the cart is empty.
pub const EMPTY_CART_NOTICE: &str = "Your cart is empty.";

/// Cart surface that keeps the latest state and writes it as a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalSurface {
    lines: Vec<LineView>,
    summary: Option<(OrderSummary, SummaryDisplay)>,
    select_all: SelectAllState,
    empty: bool,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            summary: None,
            select_all: SelectAllState::None,
            empty: true,
        }
    }
}

impl TerminalSurface {
    /// Blank surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines currently drawn.
    pub fn lines(&self) -> &[LineView] {
        &self.lines
    }

    /// Write the cart page to `out`.
    ///
    /// # Errors
    ///
    /// Returns an IO error if `out` cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        if self.empty {
            return writeln!(out, "{EMPTY_CART_NOTICE}");
        }

        let mut builder = Builder::default();

        builder.push_record([
            select_marker(self.select_all),
            "Item",
            "Category",
            "Qty",
            "Unit Price",
            "Total",
            "Was",
        ]);

        for line in &self.lines {
            builder.push_record([
                if line.selected { "[x]" } else { "[ ]" }.to_string(),
                line.title.clone(),
                line.category.clone(),
                line.quantity.to_string(),
                line.unit_price.clone(),
                line.line_total.clone(),
                line.original_line_total.clone().unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();

        table.with(Theme::from(Style::modern_rounded()));
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..7), Alignment::right());
        table.modify(Columns::new(6..7), color_dark_grey());

        writeln!(out, "\n{table}")?;

        if let Some((summary, display)) = &self.summary {
            write_summary(&mut out, summary, display)?;
        }

        Ok(())
    }
}

impl CartSurface for TerminalSurface {
    fn show_empty(&mut self) {
        self.lines.clear();
        self.summary = None;
        self.select_all = SelectAllState::None;
        self.empty = true;
    }

    fn render_lines(&mut self, lines: &[LineView]) {
        self.lines = lines.to_vec();
        self.empty = lines.is_empty();
    }

    fn update_line(&mut self, line: &LineView) {
        if let Some(existing) = self.lines.iter_mut().find(|existing| existing.id == line.id) {
            *existing = line.clone();
        }
    }

    fn update_summary(&mut self, summary: &OrderSummary, display: &SummaryDisplay) {
        self.summary = Some((*summary, display.clone()));
    }

    fn update_select_all(&mut self, state: SelectAllState) {
        self.select_all = state;
    }
}

fn select_marker(state: SelectAllState) -> &'static str {
    match state {
        SelectAllState::All => "[x]",
        SelectAllState::Partial => "[-]",
        SelectAllState::None => "[ ]",
    }
}

/// Write the order summary block.
///
/// # Errors
///
/// Returns an IO error if `out` cannot be written.
pub fn write_summary(
    out: &mut impl io::Write,
    summary: &OrderSummary,
    display: &SummaryDisplay,
) -> io::Result<()> {
    let savings = format!(
        "({:.2}%) {}",
        summary.savings_percent_points(),
        display.discount
    );

    let rows = [
        (" Subtotal:", display.subtotal.as_str()),
        (" Discount:", savings.as_str()),
        (" Shipping:", display.shipping.as_str()),
        (" Total:", display.grand_total.as_str()),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.chars().count()).max().unwrap_or(0);

    for (label, value) in rows {
        writeln!(out, "{label:>label_width$}  {value:>value_width$}")?;
    }

    writeln!(out)
}

/// Write the checkout page.
///
/// # Errors
///
/// Returns an IO error if `out` cannot be written.
pub fn write_checkout(mut out: impl io::Write, view: &CheckoutView) -> io::Result<()> {
    let Some(preview) = &view.preview else {
        writeln!(out, "{EMPTY_CART_MESSAGE}")?;
        return write_summary(&mut out, &view.summary, &view.display);
    };

    let others = preview.line_count.saturating_sub(1);

    writeln!(out, "\n{} ({})", preview.title, preview.category)?;

    if others > 0 {
        writeln!(out, "  and {others} more")?;
    }

    writeln!(out, "  {} items, {}\n", view.total_quantity, preview.total)?;

    write_summary(&mut out, &view.summary, &view.display)
}

/// Write a product grid with optional pagination and notice.
///
/// # Errors
///
/// Returns an IO error if `out` cannot be written.
pub fn write_products(
    mut out: impl io::Write,
    cards: &[ProductCard],
    pagination: Option<&Pagination>,
    notice: Option<&str>,
) -> io::Result<()> {
    if let Some(notice) = notice {
        return writeln!(out, "{notice}");
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Product", "Price", "Was"]);

    for card in cards {
        builder.push_record([
            card.id.clone(),
            card.title.clone(),
            card.price.clone(),
            card.original_price.clone().unwrap_or_default(),
        ]);
    }

    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..4), Alignment::right());
    table.modify(Columns::new(3..4), color_dark_grey());

    writeln!(out, "\n{table}")?;

    if let Some(pagination) = pagination {
        writeln!(out, "{}", pagination_line(pagination))?;
    }

    Ok(())
}

/// Write one page of reviews.
///
/// # Errors
///
/// Returns an IO error if `out` cannot be written.
pub fn write_reviews(
    mut out: impl io::Write,
    reviews: &[ReviewEntry],
    pagination: Option<&Pagination>,
    empty_message: &str,
) -> io::Result<()> {
    if reviews.is_empty() {
        return writeln!(out, "{empty_message}");
    }

    for entry in reviews {
        writeln!(
            out,
            "Rating: {} {}\n  {}\n  {} on {}\n",
            entry.rating_label(),
            entry.stars(),
            entry.review.description,
            entry.review.display_name(),
            entry.product_title
        )?;
    }

    if let Some(pagination) = pagination {
        writeln!(out, "{}", pagination_line(pagination))?;
    }

    Ok(())
}

/// Write the detail page for a loaded product.
///
/// # Errors
///
/// Returns an IO error if `out` cannot be written.
pub fn write_detail(mut out: impl io::Write, view: &DetailView) -> io::Result<()> {
    writeln!(out, "\n{}", view.title)?;

    if let Some(tag) = &view.tag {
        writeln!(out, "[{tag}]")?;
    }

    match &view.original_price {
        Some(original) => writeln!(out, "{}  ORIGINAL: {original}", view.price)?,
        None => writeln!(out, "{}", view.price)?,
    }

    writeln!(out, "{} {:.1}", view.stars, view.average_rating)?;

    if !view.description.is_empty() {
        writeln!(out, "\n{}", view.description)?;
    }

    writeln!(out)?;

    if view.reviews.is_empty() {
        return writeln!(out, "No reviews yet.");
    }

    for review in &view.reviews {
        writeln!(
            out,
            "{} {}\n  {}",
            review.display_name(),
            crate::products::stars(review.clamped_rating()),
            review.description
        )?;
    }

    Ok(())
}

fn pagination_line(pagination: &Pagination) -> String {
    let mut line = String::new();

    for link in pagination {
        if !line.is_empty() {
            line.push(' ');
        }

        if link.active {
            _ = write!(line, "[{}]", link.page);
        } else {
            _ = write!(line, "{}", link.page);
        }
    }

    line
}

/// ANSI dark grey foreground.
fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{items::LineItem, summary::OrderCalculator, views::listing::PageLink};

    use super::*;

    #[test]
    fn empty_surface_prints_notice() -> TestResult {
        let mut out = Vec::new();

        TerminalSurface::new().write_to(&mut out)?;

        assert_eq!(String::from_utf8(out)?, format!("{EMPTY_CART_NOTICE}\n"));

        Ok(())
    }

    #[test]
    fn update_line_replaces_matching_line_only() -> TestResult {
        let first = LineItem::new("a", "Alpha", Decimal::ONE, None, 1).ok_or("invalid item")?;
        let second = LineItem::new("b", "Beta", Decimal::ONE, None, 1).ok_or("invalid item")?;

        let mut surface = TerminalSurface::new();

        surface.render_lines(&[
            LineView::new(&first, true, iso::USD),
            LineView::new(&second, true, iso::USD),
        ]);
        surface.update_line(&LineView::new(&second, false, iso::USD));

        let selected: Vec<bool> = surface.lines().iter().map(|line| line.selected).collect();

        assert_eq!(selected, vec![true, false]);

        Ok(())
    }

    #[test]
    fn cart_table_lists_lines_and_totals() -> TestResult {
        let item = LineItem::new("p1", "Leather Boots", Decimal::from(80), Some(Decimal::from(100)), 2)
            .ok_or("invalid item")?;
        let summary = OrderCalculator::new().summarize(std::slice::from_ref(&item));

        let mut surface = TerminalSurface::new();

        surface.render_lines(&[LineView::new(&item, true, iso::USD)]);
        surface.update_summary(&summary, &summary.display(iso::USD));
        surface.update_select_all(SelectAllState::All);

        let mut out = Vec::new();
        surface.write_to(&mut out)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Leather Boots"));
        assert!(text.contains("$160.00"));
        assert!(text.contains("$200.00"));
        assert!(text.contains("(20.00%) $40.00"));

        Ok(())
    }

    #[test]
    fn pagination_marks_active_page() {
        let pagination: Pagination = (1..=3)
            .map(|page| PageLink {
                page,
                active: page == 2,
            })
            .collect();

        assert_eq!(pagination_line(&pagination), "1 [2] 3");
    }
}
