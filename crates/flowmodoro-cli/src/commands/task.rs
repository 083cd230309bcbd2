//! Task management commands for CLI.
//!
//! Indices on the command line are 1-based, as printed by `task list`.

use clap::Subcommand;
use flowmodoro_core::{KvStore, TaskList};

use crate::common::{open_store, zero_based, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Append a task
    Add {
        /// Task text (blank text is ignored)
        text: Vec<String>,
    },
    /// Remove a task by position
    Remove {
        /// Position from `task list`
        index: usize,
    },
    /// Move a task to another position
    Move {
        from: usize,
        to: usize,
    },
    /// Rearrange all tasks; give every current position once, in the new order
    Reorder {
        #[arg(required = true)]
        order: Vec<usize>,
    },
    /// List tasks
    List {
        /// Output as JSON array of strings
        #[arg(long)]
        json: bool,
    },
}

pub fn print_tasks(tasks: &TaskList) {
    println!("Tasks ({})", tasks.len());
    for (i, task) in tasks.tasks().iter().enumerate() {
        println!("{:>3}. {}", i + 1, task.text);
    }
}

fn position(index: usize, len: usize) -> CliResult<usize> {
    zero_based(index)
        .filter(|&i| i < len)
        .ok_or_else(|| format!("no task at position {index} (have {len})").into())
}

pub fn run(action: TaskAction) -> CliResult {
    let store = open_store(false)?;
    run_with(action, &store)
}

fn run_with(action: TaskAction, store: &impl KvStore) -> CliResult {
    let mut tasks = TaskList::load(store);

    match action {
        TaskAction::Add { text } => {
            let text = text.join(" ");
            if tasks.add(&text) {
                tasks.save(store)?;
                println!("Task added: {}", tasks.len());
            } else {
                println!("Ignored blank task");
            }
        }
        TaskAction::Remove { index } => {
            let i = position(index, tasks.len())?;
            if let Some(task) = tasks.remove(i) {
                tasks.save(store)?;
                println!("Task removed: {}", task.text);
            }
        }
        TaskAction::Move { from, to } => {
            let from = position(from, tasks.len())?;
            let to = position(to, tasks.len())?;
            tasks.move_task(from, to)?;
            tasks.save(store)?;
            print_tasks(&tasks);
        }
        TaskAction::Reorder { order } => {
            let order = order
                .into_iter()
                .map(|i| zero_based(i).unwrap_or(usize::MAX))
                .collect::<Vec<_>>();
            tasks.reorder(&order)?;
            tasks.save(store)?;
            print_tasks(&tasks);
        }
        TaskAction::List { json } => {
            if json {
                let texts: Vec<&str> = tasks.tasks().iter().map(|t| t.text.as_str()).collect();
                println!("{}", serde_json::to_string_pretty(&texts)?);
            } else {
                print_tasks(&tasks);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowmodoro_core::MemoryStore;

    fn texts(store: &MemoryStore) -> Vec<String> {
        TaskList::load(store)
            .tasks()
            .iter()
            .map(|t| t.text.clone())
            .collect()
    }

    fn add(store: &MemoryStore, text: &str) {
        run_with(
            TaskAction::Add {
                text: vec![text.to_string()],
            },
            store,
        )
        .unwrap();
    }

    #[test]
    fn add_joins_words_and_persists() {
        let store = MemoryStore::new();
        run_with(
            TaskAction::Add {
                text: vec!["write".into(), "report".into()],
            },
            &store,
        )
        .unwrap();
        add(&store, "   ");
        assert_eq!(texts(&store), vec!["write report"]);
    }

    #[test]
    fn positions_are_one_based() {
        let store = MemoryStore::new();
        add(&store, "a");
        add(&store, "b");
        add(&store, "c");
        run_with(TaskAction::Remove { index: 1 }, &store).unwrap();
        assert_eq!(texts(&store), vec!["b", "c"]);
        assert!(run_with(TaskAction::Remove { index: 0 }, &store).is_err());
        assert!(run_with(TaskAction::Remove { index: 3 }, &store).is_err());

        run_with(TaskAction::Move { from: 2, to: 1 }, &store).unwrap();
        assert_eq!(texts(&store), vec!["c", "b"]);
    }

    #[test]
    fn reorder_rejects_bad_order() {
        let store = MemoryStore::new();
        add(&store, "a");
        add(&store, "b");
        run_with(TaskAction::Reorder { order: vec![2, 1] }, &store).unwrap();
        assert_eq!(texts(&store), vec!["b", "a"]);
        assert!(run_with(TaskAction::Reorder { order: vec![1, 1] }, &store).is_err());
        assert!(run_with(TaskAction::Reorder { order: vec![0, 1] }, &store).is_err());
        assert_eq!(texts(&store), vec!["b", "a"]);
    }
}
