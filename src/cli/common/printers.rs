// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pretty printers for reporting information and warnings as trees.

use std::{borrow::Cow, sync::Mutex};

use log::Level;

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

lazy_static::lazy_static! {
    static ref WARNINGS: Mutex<Vec<Vec<Cow<'static, str>>>> = Mutex::new(vec![]);
}

type Block = Vec<Cow<'static, str>>;

/// Log a bold title followed by each block as a branch of a tree. The first
/// line of each block gets a branch symbol, continuation lines get a vertical
/// bar.
fn print_tree(level: Level, title: &str, blocks: &[Block]) {
    log::log!(level, "{}", console::style(title).bold());
    let num_blocks = blocks.len();
    for (i_block, block) in blocks.iter().enumerate() {
        let num_lines = block.len();
        for (i_line, line) in block.iter().enumerate() {
            let symbol = match (i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks) {
                (0, true, true) => UP_AND_RIGHT,
                (0, _, _) => VERTICAL_AND_RIGHT,
                _ => VERTICAL,
            };
            log::log!(level, "{symbol} {line}");
        }
    }
    log::log!(level, "");
}

/// Collects lines of information about a parsed set of arguments, then prints
/// them all at once.
pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Vec<Block>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    pub(crate) fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub(crate) fn display(self) {
        print_tree(Level::Info, &self.title, &self.blocks);
    }
}

fn push_warning(block: Block) {
    let mut warnings = WARNINGS.lock().unwrap_or_else(|e| e.into_inner());
    warnings.push(block);
}

/// Something that can be deferred as a warning, to be printed with all other
/// warnings by [`display_warnings`].
pub(crate) trait Warn {
    fn warn(self);
}

impl Warn for String {
    fn warn(self) {
        push_warning(vec![self.into()]);
    }
}

/// Print out any warnings that have been collected as CLI arguments have been
/// parsed. This should only be called once all arguments have been parsed
/// into parameters.
pub(crate) fn display_warnings() {
    log::debug!("Displaying warnings");
    let mut warnings = WARNINGS.lock().unwrap_or_else(|e| e.into_inner());
    if warnings.is_empty() {
        return;
    }
    print_tree(Level::Warn, "Warnings", &warnings);
    warnings.clear();
}
