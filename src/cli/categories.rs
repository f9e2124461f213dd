use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::models::Category;

pub fn category_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Category"]);
    for cat in Category::ALL {
        table.add_row(vec![Cell::new(cat.index() + 1), Cell::new(cat.label())]);
    }
    table
}

pub fn list() -> Result<()> {
    println!("Categories\n{}", category_table());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_category_in_order() {
        let rendered = category_table().to_string();
        let food = rendered.find("Food & Drinks").unwrap();
        let other = rendered.find("Other").unwrap();
        assert!(food < other);
        assert!(rendered.contains("Stock Market Investments"));
        assert_eq!(category_table().row_iter().count(), Category::ALL.len());
    }
}
