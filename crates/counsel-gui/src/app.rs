mod state;

use counsel_core::{
  Directory,
  seed
};
use gloo::console::log;
use gloo::timers::callback::Timeout;
pub use state::{
  Action,
  DirectoryState,
  Field,
  FilterControl,
  FilterControls
};
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with,
  use_reducer
};

use crate::components::{
  CreateForm,
  EditModalView,
  FiltersPanel,
  ProfileCardView
};

fn initial_state() -> DirectoryState {
  let directory = seed::embedded()
    .map_err(|err| err.to_string())
    .and_then(|profiles| {
      Directory::from_seed(profiles)
        .map_err(|err| err.to_string())
    })
    .unwrap_or_else(|err| {
      tracing::error!(error = %err, "bundled seed rejected; starting empty");
      Directory::new(
        Default::default(),
        Default::default()
      )
    });
  DirectoryState::new(directory)
}

#[function_component(App)]
pub fn app() -> Html {
  let state =
    use_reducer(initial_state);

  {
    let dispatcher =
      state.dispatcher();
    use_effect_with(
      state.pending,
      move |pending| {
        if let Some(ticket) = *pending {
          let millis = u32::try_from(
            ticket.delay.as_millis()
          )
          .unwrap_or(u32::MAX);
          // Not cancelled on reopen;
          // stale tickets are ignored
          // by the modal.
          Timeout::new(millis, move || {
            dispatcher.dispatch(
              Action::TimerFired(ticket)
            );
          })
          .forget();
        }
        || ()
      }
    );
  }

  use_effect_with(
    state.notice.clone(),
    |notice| {
      if let Some((_, text)) = notice {
        ui_debug("notice", text);
        if let Some(window) =
          web_sys::window()
        {
          if let Err(err) = window
            .alert_with_message(text)
          {
            tracing::warn!(
              error = ?err,
              "notice alert failed"
            );
          }
        }
      }
      || ()
    }
  );

  let on_filter = {
    let dispatcher =
      state.dispatcher();
    Callback::from(
      move |(control, value): (
        FilterControl,
        String
      )| {
        dispatcher.dispatch(
          Action::Filter(control, value)
        )
      }
    )
  };

  let on_create_field = {
    let dispatcher =
      state.dispatcher();
    Callback::from(
      move |(field, value): (
        Field,
        String
      )| {
        dispatcher.dispatch(
          Action::CreateField(
            field, value
          )
        )
      }
    )
  };

  let on_create_submit = {
    let dispatcher =
      state.dispatcher();
    Callback::from(move |_: ()| {
      ui_debug(
        "form.create.submit",
        "create submitted"
      );
      dispatcher
        .dispatch(Action::SubmitCreate)
    })
  };

  let on_edit = {
    let dispatcher =
      state.dispatcher();
    Callback::from(move |id: u64| {
      ui_debug(
        "card.edit.click",
        &id.to_string()
      );
      dispatcher
        .dispatch(Action::BeginEdit(id))
    })
  };

  let on_delete = {
    let dispatcher =
      state.dispatcher();
    Callback::from(move |id: u64| {
      let confirmed = web_sys::window()
        .and_then(|window| {
          window
            .confirm_with_message(
              &Directory::delete_prompt(
                id
              )
            )
            .ok()
        })
        .unwrap_or(false);

      if !confirmed {
        tracing::info!(
          id,
          "profile deletion canceled"
        );
        return;
      }
      dispatcher
        .dispatch(Action::Delete(id))
    })
  };

  let on_edit_field = {
    let dispatcher =
      state.dispatcher();
    Callback::from(
      move |(field, value): (
        Field,
        String
      )| {
        dispatcher.dispatch(
          Action::EditField(field, value)
        )
      }
    )
  };

  let on_edit_save = {
    let dispatcher =
      state.dispatcher();
    Callback::from(move |_: ()| {
      ui_debug(
        "form.edit.submit",
        "save submitted"
      );
      dispatcher
        .dispatch(Action::SubmitEdit)
    })
  };

  let on_edit_cancel = {
    let dispatcher =
      state.dispatcher();
    Callback::from(move |_: ()| {
      dispatcher
        .dispatch(Action::CancelEdit)
    })
  };

  let directory = &state.directory;
  let view = directory.view();
  let profiles =
    directory.store().profiles();
  let catalog = directory.catalog();

  html! {
      <div class="directory">
          <header class="page-header">
              <h1>{ "Find a Lawyer" }</h1>
              <div class="summary">{ view.summary() }</div>
          </header>
          <FiltersPanel
              controls={state.controls.clone()}
              cities={catalog.city_counts(profiles)}
              specialties={catalog.specialty_counts(profiles)}
              on_change={on_filter}
          />
          <div class="layout">
              <div class="cards">
                  {
                      if view.no_results {
                          html! {
                              <div class="no-results">
                                  { "No lawyers match your search. Try adjusting the filters." }
                              </div>
                          }
                      } else {
                          html! {
                              <>
                                  {
                                      for view.cards.iter().cloned().map(|card| html! {
                                          <ProfileCardView
                                              key={card.id}
                                              card={card.clone()}
                                              on_edit={on_edit.clone()}
                                              on_delete={on_delete.clone()}
                                          />
                                      })
                                  }
                              </>
                          }
                      }
                  }
              </div>
              <CreateForm
                  form={state.create_form.clone()}
                  error={state.create_error.clone()}
                  cities={catalog.cities.clone()}
                  specialties={catalog.specialties.clone()}
                  on_field={on_create_field}
                  on_submit={on_create_submit}
              />
          </div>
          <EditModalView
              phase={directory.modal().phase()}
              form={state.edit_form.clone()}
              error={state.edit_error.clone()}
              cities={catalog.cities.clone()}
              specialties={catalog.specialties.clone()}
              on_field={on_edit_field}
              on_save={on_edit_save}
              on_cancel={on_edit_cancel}
          />
      </div>
  }
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
