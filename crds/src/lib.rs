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

pub mod application;
pub mod traits;

/// Label holding the identifier of the project the application belongs to.
pub static PROJECT_LABEL: &str = "projectId";

/// Label holding the identifier of the template the application was
/// instantiated from.
pub static TEMPLATE_LABEL: &str = "applicationTemplateId";

/// The labels every application must carry before admission.
pub const REQUIRED_LABELS: [&str; 2] = [PROJECT_LABEL, TEMPLATE_LABEL];
