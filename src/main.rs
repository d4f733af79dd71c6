// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::Parser;

use fpi_dettable::FpiDettable;

fn main() {
    // Run, only performing extra steps if it returns an error.
    if let Err(e) = FpiDettable::parse().run() {
        eprintln!("\nError: {e}");
        std::process::exit(1);
    }
}
