use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use prettytable::{row, Table};

use teller::{
    import_customers, BankCatalog, Customer, CustomerDirectory, LockWait, TransactionLedger,
};

/// Inspect and update the record stores of one bank data directory
#[derive(Parser, Debug)]
#[command(name = "teller")]
#[command(about = "Inspect and update bank record stores", long_about = None)]
struct Cli {
    /// Bank data directory holding the record stores and catalog.json
    #[arg(long = "data-dir", value_name = "DIR", default_value = "./bank-data")]
    data_dir: PathBuf,

    /// Milliseconds to wait for a locked range before giving up; 0 blocks
    #[arg(long = "lock-timeout", value_name = "MS", default_value_t = 0)]
    lock_timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one customer's balance
    Balance {
        /// Customer id
        #[arg(long)]
        id: u32,
    },
    /// Show one customer's transaction history, oldest first
    History {
        /// Customer id
        #[arg(long)]
        id: u32,
    },
    /// List customers, optionally filtered by a name regex
    Customers {
        /// Name regex to filter by
        #[arg(long)]
        name: Option<String>,
    },
    /// Register a new customer
    Register {
        /// Customer id, unique across the store
        #[arg(long)]
        id: u32,
        /// Account number, unique across the store
        #[arg(long)]
        account: u32,
        /// Customer name
        #[arg(long)]
        name: String,
        /// Opening balance in minor currency units
        #[arg(long, default_value_t = 0)]
        balance: i64,
        /// Contact number
        #[arg(long, default_value = "")]
        contact: String,
        /// Postal address
        #[arg(long, default_value = "")]
        address: String,
    },
    /// Append a transaction to a customer's ledger
    Log {
        /// Customer id
        #[arg(long)]
        id: u32,
        /// Signed amount in minor currency units
        #[arg(long)]
        amount: i64,
        /// Operation label, such as "deposit"
        #[arg(long)]
        label: String,
    },
    /// Seed the customer store from a headered CSV file
    Seed {
        /// CSV file with customer_id,account_number,name,balance columns
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(&cli.data_dir)?;
    let catalog = BankCatalog::load_or_default(&cli.data_dir)?;
    let wait = if cli.lock_timeout == 0 {
        LockWait::Block
    } else {
        LockWait::Bounded(Duration::from_millis(cli.lock_timeout))
    };
    let customers = CustomerDirectory::open_with(cli.data_dir.join(&catalog.customers), wait)?;

    match &cli.command {
        Command::Balance { id } => {
            let balance = customers.resolve_balance(*id)?;
            println!("{}", balance);
        }
        Command::History { id } => {
            let ledger =
                TransactionLedger::open_with(cli.data_dir.join(&catalog.transactions), wait)?;
            let mut table = Table::new();
            table.add_row(row!["Timestamp", "Description", "Balance"]);
            for entry in ledger.history_for(*id) {
                let entry = entry?;
                table.add_row(row![entry.timestamp, entry.description, entry.balance]);
            }
            table.printstd();
        }
        Command::Customers { name } => {
            let listed = match name {
                Some(pattern) => customers.find_by_name(pattern)?,
                None => {
                    let mut all = Vec::new();
                    for entry in customers.scan() {
                        all.push(entry?);
                    }
                    all
                }
            };
            let mut table = Table::new();
            table.add_row(row!["Id", "Account", "Name", "Balance", "Active"]);
            for (_, customer) in &listed {
                table.add_row(row![
                    customer.customer_id,
                    customer.account_number,
                    customer.name,
                    customer.balance,
                    customer.active
                ]);
            }
            table.printstd();
        }
        Command::Register {
            id,
            account,
            name,
            balance,
            contact,
            address,
        } => {
            let customer = Customer {
                customer_id: *id,
                account_number: *account,
                name: name.clone(),
                balance: *balance,
                loan_requested: false,
                loan_amount: 0,
                loan_approved: false,
                password_hash: String::new(),
                online: false,
                active: true,
                contact: contact.clone(),
                address: address.clone(),
            };
            let pos = customers.register(&customer)?;
            println!("registered customer {} at position {}", id, pos);
        }
        Command::Log { id, amount, label } => {
            let ledger =
                TransactionLedger::open_with(cli.data_dir.join(&catalog.transactions), wait)?;
            let entry = ledger.log(&customers, *id, *amount, label)?;
            println!(
                "{} | {} | balance {}",
                entry.timestamp, entry.description, entry.balance
            );
        }
        Command::Seed { csv } => {
            let imported = import_customers(&customers, csv)?;
            println!("imported {} customers", imported);
        }
    }
    Ok(())
}
