// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Outbound payment-provider integrations.

pub mod midtrans;

pub use midtrans::{CheckoutCustomer, CheckoutSession, MidtransClient, MidtransError};
