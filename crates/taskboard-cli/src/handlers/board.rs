use crate::cli::AddArgs;
use crate::context::CliContext;
use crate::output;
use taskboard_domain::Lane;
use taskboard_persistence::SnapshotStore;

pub async fn handle_add(ctx: &CliContext, args: AddArgs) -> anyhow::Result<()> {
    let project = match args.project {
        Some(project) => project,
        None => ctx.default_project().await?,
    };
    let item = ctx
        .store
        .add_item(project, args.title, args.lane, args.sprint)
        .await?;
    output::output_success(&item);
    Ok(())
}

pub async fn handle_show(ctx: &CliContext, lane: Option<Lane>) -> anyhow::Result<()> {
    let snapshot = ctx.store.load().await?;
    let items: Vec<_> = match lane {
        Some(lane) => snapshot.lane(lane).to_vec(),
        None => snapshot.into_items(),
    };
    output::output_list(items);
    Ok(())
}

pub async fn handle_compact(ctx: &CliContext, lane: Lane) -> anyhow::Result<()> {
    let snapshot = ctx.store.compact_lane(lane).await?;
    output::output_list(snapshot.lane(lane).to_vec());
    Ok(())
}
