use crate::registry::{Command, Opt};

const FLAG_WIDTH: usize = 24;

/// Renders the help text for `program`.
pub fn render(program: &str) -> String {
    let mut lines = vec![
        format!(
            "usage: {program} <command> [options] {} <input-file>",
            Opt::Input.flag()
        ),
        String::new(),
        "Commands:".to_owned(),
    ];

    for cmd in Command::ALL {
        lines.push(format!(
            "    {flag: <FLAG_WIDTH$}{desc}",
            flag = cmd.flag(),
            desc = cmd.description()
        ));
    }

    lines.push(String::new());
    lines.push("Options:".to_owned());
    for opt in Opt::ALL {
        let flag = match opt.value_name() {
            Some(value) => format!("{}, {} {value}", opt.flag(), opt.long_flag()),
            None => format!("{}, {}", opt.flag(), opt.long_flag()),
        };
        lines.push(format!(
            "    {flag: <FLAG_WIDTH$}{desc}",
            desc = opt.description()
        ));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
