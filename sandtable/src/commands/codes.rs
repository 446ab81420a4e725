// sandtable/src/commands/codes.rs

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use sandtable_core::ErrorHandler;
use sandtable_core::domain::error::{ErrorCode, localized_message};

pub fn execute(handler: &ErrorHandler) -> anyhow::Result<()> {
    let language = handler.language(None);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Code", "Name", "Kind", "Message"]);

    for code in ErrorCode::all() {
        let kind = code.default_kind();
        table.add_row(vec![
            code.value().to_string(),
            code.name().to_string(),
            kind.to_string(),
            localized_message(code, kind, language).to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}
