use crate::cli::DragArgs;
use crate::context::CliContext;
use crate::output;
use serde_json::json;
use taskboard_domain::{DropResult, Reconciliation};

pub async fn handle(ctx: &CliContext, args: DragArgs) -> anyhow::Result<()> {
    let mut board = ctx.board().await?;
    let pointer = ctx.pointer(args.pointer_x, args.viewport_width);
    let target = args.target.as_deref();

    if !board.drag_start(args.item) {
        output::output_error(&format!("Item not found: {}", args.item));
    }
    if let Some(lane) = board.drag_over(target, pointer) {
        tracing::debug!("Hovering over {}", lane);
    }

    match board.drag_end(target, pointer).await {
        DropResult::Dispatched(Reconciliation::Confirmed(item)) => {
            output::output_success(json!({ "moved": true, "item": item }));
        }
        DropResult::Unchanged(placement) => {
            output::output_success(json!({ "moved": false, "placement": placement }));
        }
        DropResult::Dispatched(Reconciliation::RolledBack(e)) => {
            output::output_error(&e.notification());
        }
        DropResult::Dispatched(Reconciliation::Stale) => {
            output::output_error("Move was superseded by a newer change");
        }
        DropResult::Ignored => {
            output::output_error(&format!("Item not found: {}", args.item));
        }
    }
    Ok(())
}
