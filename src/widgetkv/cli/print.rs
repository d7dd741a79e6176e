use colored::Colorize;
use unicode_width::UnicodeWidthStr;
use widgetkv::api::{CmdMessage, ListedField, MessageLevel};
use widgetkv::config::WidgetKvConfig;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_listed_fields(fields: &[ListedField]) {
    let names: Vec<String> = fields
        .iter()
        .map(|f| format!("{}.{}", f.widget, f.field))
        .collect();
    let width = names.iter().map(|n| n.width()).max().unwrap_or(0);

    for (name, field) in names.iter().zip(fields) {
        let padding = " ".repeat(width - name.width());
        let count = format!(
            "{} {}",
            field.pairs,
            if field.pairs == 1 { "pair" } else { "pairs" }
        );
        println!("  {}{}  {}", name, padding, count.dimmed());
    }
}

pub(super) fn print_config(config: &WidgetKvConfig) {
    for key in widgetkv::config::CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}
