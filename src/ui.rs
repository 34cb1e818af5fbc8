pub fn render_index(date: &str, view: &str, year: i32) -> String {
    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{VIEW}}", view)
        .replace("{{YEAR}}", &year.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Journal {{YEAR}}</title>
  <style>
    :root {
      --bg: #f6f2ea;
      --ink: #26251f;
      --muted: #7b756a;
      --card: #ffffff;
      --line: rgba(38, 37, 31, 0.12);
      --accent: #b4552d;
      --sidebar: #26251f;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      display: flex;
      background: var(--bg);
      color: var(--ink);
      font-family: "Georgia", "Times New Roman", serif;
    }

    .sidebar {
      width: 210px;
      background: var(--sidebar);
      color: #f2ede3;
      padding: 28px 18px;
      display: flex;
      flex-direction: column;
      gap: 8px;
      min-height: 100vh;
    }

    .sidebar h1 {
      font-size: 1.3rem;
      margin: 0 0 18px;
      font-weight: 600;
      letter-spacing: 0.02em;
    }

    .nav-item {
      background: none;
      border: none;
      color: inherit;
      text-align: left;
      padding: 10px 12px;
      border-radius: 8px;
      font-size: 0.95rem;
      font-family: inherit;
      cursor: pointer;
      opacity: 0.75;
    }

    .nav-item:hover { opacity: 1; background: rgba(255, 255, 255, 0.06); }
    .nav-item.active { opacity: 1; background: rgba(255, 255, 255, 0.12); }

    .content { flex: 1; padding: 28px 32px 48px; max-width: 1100px; }

    .topbar {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
      margin-bottom: 20px;
    }

    .topbar h2 { margin: 0; text-transform: capitalize; font-weight: 600; }

    .date-controls { display: flex; align-items: center; gap: 8px; }

    .date-controls button {
      border: 1px solid var(--line);
      background: var(--card);
      border-radius: 8px;
      padding: 6px 12px;
      font-size: 1rem;
      cursor: pointer;
    }

    .date-controls input[type="date"] {
      border: 1px solid var(--line);
      border-radius: 8px;
      padding: 6px 8px;
      font-family: inherit;
      background: var(--card);
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 20px;
      margin-bottom: 18px;
    }

    .stat-row { display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 14px; }

    .stat { text-align: center; padding: 16px 10px; }
    .stat .value { display: block; font-size: 1.8rem; font-weight: 600; color: var(--accent); }
    .stat .label { display: block; font-size: 0.78rem; text-transform: uppercase; letter-spacing: 0.1em; color: var(--muted); margin-top: 6px; }

    label.field-label { display: block; font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.08em; color: var(--muted); margin: 12px 0 4px; }

    textarea, input[type="text"] {
      width: 100%;
      border: 1px solid var(--line);
      border-radius: 8px;
      padding: 8px 10px;
      font-family: inherit;
      font-size: 0.95rem;
      background: #fdfcf9;
      resize: vertical;
    }

    textarea { min-height: 44px; }
    textarea.tall { min-height: 120px; }

    .grid-2 { display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 18px; }
    .grid-3 { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 14px; }

    .focus-list { list-style: none; margin: 12px 0 0; padding: 0; display: flex; flex-direction: column; gap: 10px; }
    .focus-list li { display: flex; align-items: center; gap: 10px; }
    .focus-list input[type="checkbox"] { width: 18px; height: 18px; }
    .focus-list .done { text-decoration: line-through; opacity: 0.55; }

    table.habits { width: 100%; border-collapse: collapse; }
    table.habits th, table.habits td { border-bottom: 1px solid var(--line); padding: 8px 6px; text-align: center; font-size: 0.9rem; }
    table.habits td.name { display: flex; gap: 6px; align-items: center; text-align: left; min-width: 220px; }

    .delete-habit { border: none; background: none; color: var(--muted); font-size: 1.1rem; cursor: pointer; }
    .delete-habit:hover { color: var(--accent); }

    .btn {
      border: 1px solid var(--line);
      background: var(--card);
      border-radius: 8px;
      padding: 8px 14px;
      font-family: inherit;
      font-size: 0.9rem;
      cursor: pointer;
    }

    .btn:hover { border-color: var(--accent); color: var(--accent); }

    .month-grid { display: grid; grid-template-columns: repeat(7, 1fr); gap: 8px; }
    .month-grid .head { font-size: 0.75rem; text-transform: uppercase; color: var(--muted); text-align: center; }
    .month-grid .slot { border: 1px solid var(--line); border-radius: 8px; padding: 6px; background: #fdfcf9; min-height: 84px; }
    .month-grid .slot .top { display: flex; justify-content: space-between; align-items: center; font-size: 0.8rem; color: var(--muted); }
    .month-grid .slot textarea { border: none; background: none; padding: 2px 0; min-height: 48px; font-size: 0.82rem; }
    .month-grid .gcal { border: none; background: none; cursor: pointer; font-size: 0.85rem; }
    .month-grid .empty { border: none; background: none; }

    .milestone-row { display: flex; align-items: center; gap: 10px; margin-bottom: 8px; }
    .milestone-row .num { width: 22px; color: var(--muted); font-size: 0.85rem; }

    .week-cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 12px; }
    .week-cards .label { font-size: 0.72rem; text-transform: uppercase; letter-spacing: 0.1em; color: var(--muted); margin-bottom: 6px; }

    #status { min-height: 1.3em; font-size: 0.9rem; color: var(--muted); margin-top: 10px; }
    #status.error { color: #b03226; }
    #status.ok { color: #2d7a4b; }
    #status button { margin-left: 8px; }

    @media (max-width: 760px) {
      body { flex-direction: column; }
      .sidebar { width: 100%; min-height: 0; flex-direction: row; flex-wrap: wrap; }
    }
  </style>
</head>
<body>
  <nav class="sidebar">
    <h1>Journal {{YEAR}}</h1>
    <button class="nav-item" data-view="dashboard">Dashboard</button>
    <button class="nav-item" data-view="daily">Daily</button>
    <button class="nav-item" data-view="monthly">Monthly</button>
    <button class="nav-item" data-view="strategy">Strategy</button>
    <button class="nav-item" data-view="weekly">Weekly</button>
    <button class="nav-item" data-view="roadmap">Roadmap</button>
    <button class="nav-item" data-view="help">Help</button>
  </nav>

  <div class="content">
    <div class="topbar">
      <h2 id="view-title">{{VIEW}}</h2>
      <div class="date-controls">
        <button id="prev-date" title="Previous day">&#8592;</button>
        <input type="date" id="date-picker" value="{{DATE}}" />
        <button id="next-date" title="Next day">&#8594;</button>
      </div>
    </div>
    <div id="main"></div>
    <div id="status"></div>
  </div>

  <script>
    const state = { view: '{{VIEW}}', date: '{{DATE}}', year: {{YEAR}} };
    const main = document.getElementById('main');
    const statusEl = document.getElementById('status');
    const viewTitle = document.getElementById('view-title');
    const datePicker = document.getElementById('date-picker');
    const debounceTimers = {};

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.className = type || '';
    };

    // Failed writes surface a retry affordance; the page stays interactive.
    const save = (doSave) => {
      setStatus('Saving...', '');
      doSave()
        .then(() => {
          setStatus('Saved', 'ok');
          setTimeout(() => { if (statusEl.textContent === 'Saved') setStatus('', ''); }, 1200);
        })
        .catch((err) => {
          setStatus('Save failed: ' + err.message, 'error');
          const retry = document.createElement('button');
          retry.className = 'btn';
          retry.textContent = 'Retry';
          retry.addEventListener('click', () => save(doSave));
          statusEl.appendChild(retry);
        });
    };

    const api = async (path, options) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        throw new Error(await res.text() || res.statusText);
      }
      const type = res.headers.get('content-type') || '';
      return type.includes('application/json') ? res.json() : res.text();
    };

    const post = (path, body) => api(path, {
      method: 'POST',
      headers: { 'content-type': 'application/json' },
      body: JSON.stringify(body)
    });

    // One write per input after 500ms of quiescence.
    const debounced = (key, fn) => {
      clearTimeout(debounceTimers[key]);
      debounceTimers[key] = setTimeout(fn, 500);
    };

    const applySession = (session) => {
      state.view = session.view;
      state.date = session.date;
      datePicker.value = session.date;
      viewTitle.textContent = session.view;
      document.querySelectorAll('.nav-item').forEach((item) => {
        item.classList.toggle('active', item.dataset.view === session.view);
      });
      render();
    };

    const render = () => {
      const renderers = {
        dashboard: renderDashboard,
        daily: renderDaily,
        monthly: renderMonthly,
        strategy: renderStrategy,
        weekly: renderWeekly,
        roadmap: renderRoadmap,
        help: renderHelp
      };
      (renderers[state.view] || renderDashboard)().catch((err) => setStatus(err.message, 'error'));
    };

    const esc = (text) => {
      const div = document.createElement('div');
      div.textContent = text == null ? '' : text;
      return div.innerHTML;
    };

    async function renderDashboard() {
      const data = await api('/api/dashboard');
      main.innerHTML = `
        <div class="card">
          <h3>Week ${data.week_number} of 13</h3>
          <div class="stat-row">
            <div class="stat"><span class="value">${data.completed_count}/3</span><span class="label">Daily Targets</span></div>
            <div class="stat"><span class="value">${data.day_streak}</span><span class="label">Day Streak</span></div>
            <div class="stat"><span class="value">${data.habit_score}%</span><span class="label">Habit Score</span></div>
          </div>
        </div>
        <div class="card">
          <h3>Today's Focus</h3>
          <ul class="focus-list">
            ${data.targets.map((t, i) => `
              <li>
                <input type="checkbox" data-index="${i + 1}" ${t.completed ? 'checked' : ''}>
                <span class="${t.completed ? 'done' : ''}">${esc(t.text)}</span>
              </li>
            `).join('')}
          </ul>
        </div>
      `;
      main.querySelectorAll('.focus-list input').forEach((box) => {
        box.addEventListener('change', () => {
          const fields = {};
          fields['target_' + box.dataset.index + '_completed'] = box.checked;
          save(() => post('/api/entry', { fields }).then(renderDashboard));
        });
      });
    }

    const dailyField = (key, label, tall) => `
      <label class="field-label">${label}</label>
      <textarea data-key="${key}" class="${tall ? 'tall' : ''}"></textarea>
    `;

    async function renderDaily() {
      const entry = await api('/api/entry');
      let timeline = '';
      for (let hour = 6; hour <= 21; hour++) {
        const label = hour > 12 ? (hour - 12) + ' PM' : hour + (hour === 12 ? ' PM' : ' AM');
        timeline += `
          <div class="milestone-row"><span class="num">${label}</span><input type="text" data-key="time_${hour}_00"></div>
          <div class="milestone-row"><span class="num">:30</span><input type="text" data-key="time_${hour}_30"></div>
        `;
      }
      main.innerHTML = `
        <div class="grid-2">
          <div class="card">
            <h3>Morning Routine</h3>
            ${dailyField('morning_gratitude_1', 'Grateful for (1)')}
            ${dailyField('morning_gratitude_2', 'Grateful for (2)')}
            ${dailyField('morning_gratitude_3', 'Grateful for (3)')}
            ${dailyField('target_1', 'Target 1')}
            ${dailyField('target_2', 'Target 2')}
            ${dailyField('target_3', 'Target 3')}
          </div>
          <div class="card">
            <h3>Schedule / Actions</h3>
            ${timeline}
          </div>
          <div class="card">
            <h3>Evening Review</h3>
            ${dailyField('evening_gratitude_1', 'Grateful for (1)')}
            ${dailyField('evening_gratitude_2', 'Grateful for (2)')}
            ${dailyField('evening_gratitude_3', 'Grateful for (3)')}
            ${dailyField('win_1', 'Wins')}
            ${dailyField('lesson_1', 'Lessons Learned')}
          </div>
          <div class="card">
            <h3>Check-Ins</h3>
            ${dailyField('midday_reflection', 'Midday Check-In', true)}
            ${dailyField('eod_reflection', 'End of Day Reflection', true)}
          </div>
        </div>
      `;
      main.querySelectorAll('[data-key]').forEach((input) => {
        const value = entry.fields[input.dataset.key];
        if (typeof value === 'string') input.value = value;
        input.addEventListener('input', () => {
          debounced(input.dataset.key, () => {
            const fields = {};
            fields[input.dataset.key] = input.value;
            save(() => post('/api/entry', { date: entry.date, fields }));
          });
        });
      });
    }

    const noteValue = async (scope, field) => {
      const data = await api(`/api/note?scope=${scope}&field=${encodeURIComponent(field)}`);
      return data.value;
    };

    const wireNotes = (scope) => {
      main.querySelectorAll('[data-note]').forEach((input) => {
        input.addEventListener('input', () => {
          debounced(scope + ':' + input.dataset.note, () => {
            save(() => post('/api/note', { scope, field: input.dataset.note, value: input.value }));
          });
        });
      });
    };

    const fillNotes = async (scope) => {
      const inputs = Array.from(main.querySelectorAll('[data-note]'));
      await Promise.all(inputs.map(async (input) => {
        input.value = await noteValue(scope, input.dataset.note);
      }));
    };

    async function renderMonthly() {
      const [year, month] = state.date.split('-').map(Number);
      const daysInMonth = new Date(year, month, 0).getDate();
      const firstWeekday = (new Date(year, month - 1, 1).getDay() + 6) % 7; // Monday-first
      const heads = ['Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat', 'Sun']
        .map((d) => `<div class="head">${d}</div>`).join('');
      let slots = '';
      for (let i = 0; i < firstWeekday; i++) slots += '<div class="slot empty"></div>';
      for (let day = 1; day <= daysInMonth; day++) {
        const num = String(day).padStart(2, '0');
        slots += `
          <div class="slot">
            <div class="top"><span>${num}</span><button class="gcal" data-day="${day}" title="Add to calendar">&#128197;</button></div>
            <textarea data-note="day_${num}"></textarea>
          </div>
        `;
      }
      main.innerHTML = `
        <div class="card">
          <button class="btn" id="export-month">Export Month to Calendar</button>
        </div>
        <div class="card"><div class="month-grid">${heads}${slots}</div></div>
        <div class="card">
          <h3>Notes</h3>
          <textarea class="tall" data-note="monthly_notes"></textarea>
        </div>
      `;
      await fillNotes('monthly');
      wireNotes('monthly');
      main.querySelectorAll('.gcal').forEach((btn) => {
        btn.addEventListener('click', async () => {
          try {
            const data = await api('/api/calendar-link?day=' + btn.dataset.day);
            window.open(data.url, '_blank');
          } catch (err) {
            alert(err.message);
          }
        });
      });
      document.getElementById('export-month').addEventListener('click', async () => {
        try {
          const res = await fetch('/api/export/month');
          if (!res.ok) {
            alert(await res.text());
            return;
          }
          const blob = await res.blob();
          const link = document.createElement('a');
          link.href = URL.createObjectURL(blob);
          link.download = `journal_${year}_${month}.ics`;
          link.click();
          URL.revokeObjectURL(link.href);
        } catch (err) {
          setStatus(err.message, 'error');
        }
      });
    }

    async function renderStrategy() {
      let milestones = '';
      for (let num = 1; num <= 7; num++) {
        milestones += `
          <div class="milestone-row">
            <span class="num">${num}</span>
            <input type="text" data-note="weekly_milestone_${num}" placeholder="Strategic milestone ${num}">
          </div>
        `;
      }
      main.innerHTML = `
        <div class="card">
          <h3>Weekly Strategy</h3>
          <p>What are the big milestones for this week?</p>
          ${milestones}
        </div>
        <div class="grid-2">
          <div class="card">
            <h3>Morning Routine</h3>
            <textarea class="tall" data-note="strategy_morning_routine"></textarea>
          </div>
          <div class="card">
            <h3>Nightly Routine</h3>
            <textarea class="tall" data-note="strategy_nightly_routine"></textarea>
          </div>
        </div>
      `;
      await fillNotes('strategy');
      wireNotes('strategy');
    }

    async function renderWeekly() {
      const data = await api('/api/weekly');
      const yearStartDay = new Date(state.year, 0, 1).getDay();
      const letters = ['S', 'M', 'T', 'W', 'T', 'F', 'S'];
      const heads = Array.from({ length: 7 }, (_, i) => letters[(yearStartDay + i) % 7]);
      const checked = {};
      data.checks.forEach((c) => { checked[c.habit_index + ':' + c.day_index] = c.completed; });

      main.innerHTML = `
        <div class="card">
          <h3>Weekly Habit Tracking &mdash; Week ${data.week_number}</h3>
          <table class="habits">
            <thead>
              <tr><th style="text-align:left">Habit / Activity</th>${heads.map((h) => `<th>${h}</th>`).join('')}<th>Total</th></tr>
            </thead>
            <tbody>
              ${data.habits.map((habit, idx) => `
                <tr>
                  <td class="name">
                    <input type="text" class="habit-name" value="${esc(habit)}" data-index="${idx}">
                    <button class="delete-habit" data-index="${idx}" title="Delete habit">&times;</button>
                  </td>
                  ${heads.map((_, day) => `
                    <td><input type="checkbox" class="habit-check" data-habit="${idx}" data-day="${day}" ${checked[idx + ':' + day] ? 'checked' : ''}></td>
                  `).join('')}
                  <td>${data.totals[idx]}</td>
                </tr>
              `).join('')}
            </tbody>
          </table>
          <button class="btn" id="add-habit" style="margin-top:14px">+ Add Habit</button>
        </div>
        <div class="card">
          <h3>Automated Weekly Insights</h3>
          <div class="stat-row">
            <div class="stat"><span class="value">${data.insights.habit_score}%</span><span class="label">Habit Consistency</span></div>
            <div class="stat"><span class="value">${data.insights.targets_mastered}/21</span><span class="label">Targets Mastered</span></div>
            <div class="stat"><span class="value">${esc(data.insights.most_consistent_habit || 'None')}</span><span class="label">Most Consistent Habit</span></div>
            <div class="stat"><span class="value">${esc(data.insights.peak_day || 'N/A')}</span><span class="label">Peak Performance Day</span></div>
          </div>
        </div>
      `;

      main.querySelectorAll('.habit-check').forEach((box) => {
        box.addEventListener('change', () => {
          save(() => post('/api/weekly/check', {
            habit_index: Number(box.dataset.habit),
            day_index: Number(box.dataset.day),
            completed: box.checked
          }).then(renderWeekly));
        });
      });
      main.querySelectorAll('.habit-name').forEach((input) => {
        input.addEventListener('change', () => {
          const habits = Array.from(main.querySelectorAll('.habit-name')).map((i) => i.value);
          save(() => api('/api/habits', {
            method: 'PUT',
            headers: { 'content-type': 'application/json' },
            body: JSON.stringify({ habits })
          }));
        });
      });
      main.querySelectorAll('.delete-habit').forEach((btn) => {
        btn.addEventListener('click', () => {
          if (!confirm('Delete this habit?')) return;
          save(() => api('/api/habits/' + btn.dataset.index, { method: 'DELETE' }).then(renderWeekly));
        });
      });
      document.getElementById('add-habit').addEventListener('click', () => {
        save(() => post('/api/habits', { name: 'New Habit' }).then(renderWeekly));
      });
    }

    async function renderRoadmap() {
      let weeks = '';
      for (let week = 1; week <= 13; week++) {
        weeks += `
          <div>
            <div class="label">Week ${week}</div>
            <textarea data-note="week_${week}_milestone" placeholder="Key milestone..."></textarea>
          </div>
        `;
      }
      let visions = '';
      for (let num = 1; num <= 15; num++) {
        visions += `
          <div class="milestone-row">
            <span class="num">${num}</span>
            <input type="text" data-note="vision_goal_${num}" placeholder="Long-term goal or value...">
          </div>
        `;
      }
      main.innerHTML = `
        <div class="card">
          <h3>13-Week Roadmap</h3>
          <label class="field-label">My Main Result Goal</label>
          <textarea data-note="roadmap_main_goal" placeholder="The one thing I want to achieve..."></textarea>
          <div class="grid-3">
            <div><label class="field-label">Progress Goal 1</label><textarea data-note="roadmap_pg_1"></textarea></div>
            <div><label class="field-label">Progress Goal 2</label><textarea data-note="roadmap_pg_2"></textarea></div>
            <div><label class="field-label">Progress Goal 3</label><textarea data-note="roadmap_pg_3"></textarea></div>
          </div>
        </div>
        <div class="card"><div class="week-cards">${weeks}</div></div>
        <div class="card">
          <h3>13-Week Wellness Plan</h3>
          <div class="grid-2">
            <div><label class="field-label">Physical</label><textarea data-note="wellness_physical"></textarea></div>
            <div><label class="field-label">Spiritual</label><textarea data-note="wellness_spiritual"></textarea></div>
            <div><label class="field-label">Contribution &amp; Service</label><textarea data-note="wellness_service"></textarea></div>
            <div><label class="field-label">Relationships</label><textarea data-note="wellness_relationships"></textarea></div>
          </div>
        </div>
        <div class="card">
          <h3>Life Vision &amp; Core Values</h3>
          ${visions}
        </div>
      `;
      await fillNotes('roadmap');
      wireNotes('roadmap');
    }

    async function renderHelp() {
      main.innerHTML = `
        <div class="card">
          <h3>How this journal works</h3>
          <p><strong>Roadmap:</strong> pick one big 13-week outcome, then three progress goals that ladder up to it.</p>
          <p><strong>Strategy:</strong> break the quarter into 7-day sprints with up to seven weekly milestones and fixed routines.</p>
          <p><strong>Daily:</strong> win the day with three targets, a half-hour schedule, gratitude and a two-point reflection.</p>
          <p><strong>Weekly:</strong> track habits with checkboxes; insights (consistency, peak day, streaks) are computed from what you record.</p>
          <p><strong>Monthly:</strong> keep per-day notes and export them as an iCalendar file.</p>
        </div>
      `;
    }

    document.querySelectorAll('.nav-item').forEach((item) => {
      item.addEventListener('click', () => {
        post('/api/view', { view: item.dataset.view })
          .then(applySession)
          .catch((err) => setStatus(err.message, 'error'));
      });
    });

    document.getElementById('prev-date').addEventListener('click', () => {
      post('/api/date', { action: 'prev' }).then(applySession).catch((err) => setStatus(err.message, 'error'));
    });
    document.getElementById('next-date').addEventListener('click', () => {
      post('/api/date', { action: 'next' }).then(applySession).catch((err) => setStatus(err.message, 'error'));
    });
    datePicker.addEventListener('change', () => {
      post('/api/date', { action: 'set', date: datePicker.value })
        .then(applySession)
        .catch((err) => {
          datePicker.value = state.date;
          setStatus(err.message, 'error');
        });
    });

    api('/api/session').then(applySession).catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
