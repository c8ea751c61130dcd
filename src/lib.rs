// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! pagelint fetches a web page, validates every outbound link it carries
//! (terminal status, transport scheme, redirect loops), and spell-checks the
//! page's visible text against a hunspell dictionary.

pub mod app;
pub mod models;
pub mod services;
