// Copyright (c) The Overture Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use kube::CustomResourceExt;
use overture_crds::application::Application;

/// Generate the custom resource definitions for Overture.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which output path to write to. If not specified, will print to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let definition = serde_yaml::to_string(&Application::crd())?;

    match &args.output {
        Some(dir) => {
            if !dir.exists() {
                bail!("The given output path does not exist: {}", dir.display());
            }
            write(&dir.join("application.yaml"), &definition)?;
        }
        None => println!("{}\n---\n", definition),
    }

    Ok(())
}

fn write(path: &Path, data: &str) -> anyhow::Result<()> {
    fs::write(path, data).with_context(|| format!("Couldn't write to file: {}", path.display()))
}
