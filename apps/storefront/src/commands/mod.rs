//! # Commands Module
//!
//! The operations the storefront UI invokes, grouped by feature.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Categories                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │  Cart Commands (cart.rs)     │   │  Shell (shell.rs)            │   │
//! │  │                              │   │                              │   │
//! │  │  • get_cart                  │◄──│  • ShellCommand parsing      │   │
//! │  │  • add_to_cart               │   │  • run_shell loop            │   │
//! │  │  • increment                 │   │  • render                    │   │
//! │  │  • decrement                 │   │                              │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  Cart commands never fail; they return the cart as it is afterwards.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod shell;
