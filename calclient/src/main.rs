// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! calclient - create and edit the events of your calendar from the terminal

use std::process::ExitCode;

use calclient_cli::run;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}
